use simplifier::{RuleTree, Simplifiable, Simplifier};

#[derive(Debug, PartialEq, Simplifiable)]
#[simplify(rename_all = "camelCase")]
enum Message<T> {
    Text { body_text: String, sent_by: String },
    Attachment(T, #[simplify(skip)] Vec<u8>),
    Ping,
}

#[derive(Simplifiable)]
enum Never {}

fn main() {
    let simplifier = Simplifier::new(RuleTree::new().remove_all(["bodyText", "0"]));

    let text: Message<String> = Message::Text {
        body_text: "hello".into(),
        sent_by: "ana".into(),
    };
    assert_eq!(
        simplifier.simplify(&text),
        Message::Text {
            body_text: String::new(),
            sent_by: "ana".into(),
        }
    );

    let attachment: Message<String> = Message::Attachment("file.txt".into(), vec![1, 2]);
    assert_eq!(
        simplifier.simplify(&attachment),
        Message::Attachment(String::new(), Vec::new())
    );

    assert_eq!(simplifier.simplify(&Message::<String>::Ping), Message::Ping);

    let _unused: Option<Never> = None;
}
