//! Every field access option on one struct.

use xss_guard::{Record, Scanner};

#[derive(Debug, Default, Record)]
struct Settings {
    theme: String,
    #[record(read_only)]
    owner: String,
    #[record(write_only)]
    token: Option<String>,
    #[record(skip)]
    retries: u32,
    #[record(skip)]
    enabled: bool,
}

fn main() {
    let settings = Settings {
        theme: "<u>dark</u>".to_string(),
        owner: "ada".to_string(),
        token: Some("t".to_string()),
        retries: 3,
        enabled: true,
    };
    let scanned = Scanner::default().scan_record(&settings).unwrap();
    assert_eq!(scanned.theme, "<u>dark</u>");
    assert_eq!(scanned.owner, "");
    assert_eq!(scanned.token, None);
    assert_eq!(scanned.retries, 0);
    assert!(!scanned.enabled);
}
