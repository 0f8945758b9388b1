//! The derive resolves the runtime crate without a `use` of the trait.

#[derive(Debug, Default, xss_guard::Record)]
struct Message {
    r#type: String,
    text: Option<String>,
}

fn main() {
    let message = Message {
        r#type: "note".to_string(),
        text: Some("<b>hi</b>".to_string()),
    };
    let record: &dyn xss_guard::Record = &message;
    assert_eq!(record.type_name(), "Message");
    assert_eq!(record.get("type"), Some("note"));
    assert_eq!(record.fields().len(), 2);
}
