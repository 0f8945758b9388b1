//! Tests for `#[derive(Record)]` as seen from a downstream crate.
//!
//! These tests verify that:
//! - field access options control which fields are sanitized
//! - generic and custom-constructed records scan correctly
//! - the dynamic `Record` API reports fields and downcasts

use std::borrow::Cow;

use xss_guard::{FieldDescriptor, Record, ScanError, Scanner, Value};

const XSS: &str = "<script>alert('XSS')</script>";

#[derive(Debug, Default, Record)]
struct Account {
    display_name: String,
    #[record(read_only)]
    username: String,
    #[record(write_only)]
    password: String,
    #[record(skip)]
    bio: String,
    #[record(skip)]
    logins: u64,
}

#[test]
fn test_only_readable_writable_fields_are_sanitized() {
    let scanner = Scanner::default();
    let account = Account {
        display_name: XSS.to_string(),
        username: XSS.to_string(),
        password: XSS.to_string(),
        bio: XSS.to_string(),
        logins: 7,
    };
    let scanned = scanner.scan_record(&account).unwrap();

    assert_eq!(scanned.display_name, "");
    // Fields without both accessors keep the fresh instance's zero value.
    assert_eq!(scanned.username, "");
    assert_eq!(scanned.password, "");
    assert_eq!(scanned.bio, "");
    assert_eq!(scanned.logins, 0);
}

#[test]
fn test_field_descriptors_follow_declaration_order() {
    let account = Account::default();
    let fields = account.fields();
    assert_eq!(
        fields,
        &[
            FieldDescriptor::new("display_name", true, true),
            FieldDescriptor::new("username", true, false),
            FieldDescriptor::new("password", false, true),
            FieldDescriptor::new("bio", false, false),
            FieldDescriptor::new("logins", false, false),
        ]
    );
    let scannable: Vec<_> = fields
        .iter()
        .filter(|field| field.is_scannable())
        .map(FieldDescriptor::name)
        .collect();
    assert_eq!(scannable, ["display_name"]);
}

#[test]
fn test_dynamic_access_respects_options() {
    let mut account = Account {
        display_name: "ada".to_string(),
        username: "ada_l".to_string(),
        password: "secret".to_string(),
        ..Account::default()
    };
    assert_eq!(account.get("display_name"), Some("ada"));
    assert_eq!(account.get("username"), Some("ada_l"));
    assert_eq!(account.get("password"), None);
    assert_eq!(account.get("missing"), None);

    assert!(account.set("password", "changed".to_string()));
    assert!(!account.set("username", "other".to_string()));
    assert!(!account.set("bio", "other".to_string()));
    assert_eq!(account.password, "changed");
    assert_eq!(account.username, "ada_l");
}

#[derive(Debug, Default, Record)]
struct Envelope<T> {
    subject: String,
    #[record(skip)]
    payload: T,
}

#[test]
fn test_generic_records_scan() {
    let scanner = Scanner::default();
    let envelope = Envelope {
        subject: format!("<b>hi</b>{XSS}"),
        payload: vec![1_u8, 2, 3],
    };
    let scanned = scanner.scan_record(&envelope).unwrap();
    assert_eq!(scanned.subject, "<b>hi</b>");
    assert!(scanned.payload.is_empty());
    assert_eq!(envelope.type_name(), "Envelope");
}

#[derive(Debug, Record)]
#[record(constructor = Note::blank)]
struct Note {
    title: Cow<'static, str>,
    tag: Option<String>,
}

impl Note {
    fn blank() -> Result<Self, std::convert::Infallible> {
        Ok(Self {
            title: Cow::Borrowed("untitled"),
            tag: None,
        })
    }
}

#[test]
fn test_custom_constructor_supplies_defaults() {
    let scanner = Scanner::default();
    let note = Note {
        title: Cow::Owned(format!("plan{XSS}")),
        tag: None,
    };
    let scanned = scanner.scan_record(&note).unwrap();
    assert_eq!(scanned.title, "plan");
    assert_eq!(scanned.tag, None);

    let empty_title = Note {
        title: Cow::Borrowed(""),
        tag: Some("<i>x</i>".to_string()),
    };
    let scanned = scanner.scan_record(&empty_title).unwrap();
    assert_eq!(scanned.title, "");
    assert_eq!(scanned.tag.as_deref(), Some("<i>x</i>"));
}

#[derive(Debug, Record)]
#[record(constructor = Ticket::closed)]
struct Ticket {
    summary: String,
}

impl Ticket {
    fn closed() -> Result<Self, String> {
        Err("ticket store unavailable".to_string())
    }
}

#[test]
fn test_constructor_errors_surface_as_construction_failures() {
    let scanner = Scanner::default();
    let err = scanner
        .scan(&Value::record(Ticket {
            summary: "x".to_string(),
        }))
        .unwrap_err();
    let ScanError::ConstructionFailure(failure) = &err else {
        panic!("expected a construction failure, got {err:?}");
    };
    assert_eq!(failure.type_name(), "Ticket");
    assert_eq!(failure.reason(), "ticket store unavailable");
    assert_eq!(
        err.to_string(),
        "failed to construct `Ticket`: ticket store unavailable"
    );
}

#[test]
fn test_value_records_downcast() {
    let value = Value::record(Note {
        title: Cow::Borrowed("t"),
        tag: None,
    });
    let record = value.as_record().unwrap();
    assert!(record.is::<Note>());
    assert!(!record.is::<Ticket>());

    let value = match value.into_record::<Ticket>() {
        Ok(_) => panic!("a note is not a ticket"),
        Err(value) => value,
    };
    let note: Note = value.into_record().unwrap();
    assert_eq!(note.title, "t");
}

#[test]
fn test_records_compare_by_readable_fields() {
    let a = Value::record(Account {
        display_name: "ada".to_string(),
        password: "one".to_string(),
        ..Account::default()
    });
    let b = Value::record(Account {
        display_name: "ada".to_string(),
        password: "two".to_string(),
        ..Account::default()
    });
    let c = Value::record(Account {
        display_name: "grace".to_string(),
        ..Account::default()
    });
    assert_eq!(a, b);
    assert_ne!(a, c);
}
