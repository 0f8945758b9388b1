//! Generic records get bounds on `Self`, not on every parameter.

use xss_guard::{Record, Scanner, Value};

#[derive(Debug, Default, Record)]
struct Page<M> {
    title: String,
    #[record(skip)]
    meta: M,
}

fn main() {
    let page = Page {
        title: "<script>x</script>home".to_string(),
        meta: 42_u64,
    };
    let scanned = Scanner::default().scan(&Value::record(page)).unwrap();
    let page: Page<u64> = scanned.into_record().unwrap();
    assert_eq!(page.title, "home");
    assert_eq!(page.meta, 0);
}
