//! Records without `Default` name a constructor function.

use std::fmt;

use xss_guard::{Record, Scanner};

#[derive(Debug)]
struct StoreOffline;

impl fmt::Display for StoreOffline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("store offline")
    }
}

mod builders {
    pub fn draft() -> Result<super::Draft, super::StoreOffline> {
        Ok(super::Draft {
            body: String::new(),
            revision: 1,
        })
    }
}

#[derive(Debug, Record)]
#[record(constructor = builders::draft)]
struct Draft {
    body: String,
    #[record(skip)]
    revision: u32,
}

fn main() {
    let draft = Draft {
        body: "<i>hi</i><img src=x onerror=alert(1)>".to_string(),
        revision: 9,
    };
    let scanned = Scanner::default().scan_record(&draft).unwrap();
    assert_eq!(scanned.body, "<i>hi</i>");
    assert_eq!(scanned.revision, 1);
}
