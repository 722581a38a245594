use gridkit_model::{ConfigError, TranslationChain, TranslationTable};
use gridkit_query::page::{clamp_page, total_pages};
use gridkit_query::{paginate, PageInfo, PageState, DEFAULT_PAGE_SIZE};
use pretty_assertions::assert_eq;
use std::num::NonZeroUsize;

fn size(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).unwrap()
}

fn numbers(n: usize) -> Vec<usize> {
    (1..=n).collect()
}

// ── Slicing ──────────────────────────────────────────────────────

#[test]
fn last_partial_page() {
    let rows = numbers(95);
    let window = paginate(&rows, 9, size(10));
    assert_eq!(window.rows, &[91, 92, 93, 94, 95]);
    assert_eq!(window.info.range_start, 91);
    assert_eq!(window.info.range_end, 95);
    assert_eq!(window.info.total_pages, 10);
    assert!(!window.info.has_next());
    assert!(window.info.has_previous());
}

#[test]
fn first_page() {
    let rows = numbers(95);
    let window = paginate(&rows, 0, size(10));
    assert_eq!(window.rows, &numbers(10)[..]);
    assert_eq!((window.info.range_start, window.info.range_end), (1, 10));
    assert!(!window.info.has_previous());
    assert!(window.info.has_next());
}

#[test]
fn empty_collection_has_one_empty_page() {
    let rows: Vec<usize> = Vec::new();
    let window = paginate(&rows, 0, size(25));
    assert!(window.rows.is_empty());
    assert_eq!(
        window.info,
        PageInfo {
            page: 0,
            page_size: size(25),
            total_pages: 1,
            total_rows: 0,
            range_start: 0,
            range_end: 0,
        }
    );
}

#[test]
fn out_of_range_page_is_clamped() {
    let rows = numbers(95);
    let window = paginate(&rows, 50, size(10));
    assert_eq!(window.info.page, 9);
    assert_eq!(window.rows.len(), 5);

    let empty: Vec<usize> = Vec::new();
    assert_eq!(paginate(&empty, 3, size(10)).info.page, 0);
}

#[test]
fn page_count_math() {
    assert_eq!(total_pages(0, size(10)), 1);
    assert_eq!(total_pages(10, size(10)), 1);
    assert_eq!(total_pages(11, size(10)), 2);
    assert_eq!(clamp_page(4, 30, size(10)), 2);
    assert_eq!(clamp_page(1, 30, size(10)), 1);
}

// ── PageState ────────────────────────────────────────────────────

#[test]
fn zero_page_size_is_rejected() {
    assert!(matches!(PageState::new(0, 0), Err(ConfigError::InvalidPageSize(0))));
    assert_eq!(PageState::new(2, 25).unwrap().page_size, size(25));
}

#[test]
fn clamp_reports_movement() {
    let mut state = PageState::new(7, 10).unwrap();
    assert!(state.clamp(42));
    assert_eq!(state.page, 4);
    assert!(!state.clamp(42));
}

#[test]
fn default_state() {
    let state = PageState::default();
    assert_eq!(state.page, 0);
    assert_eq!(state.page_size, DEFAULT_PAGE_SIZE);
    assert_eq!(DEFAULT_PAGE_SIZE.get(), 10);
}

#[test]
fn state_serde_uses_camel_case() {
    let state: PageState = serde_json::from_str(r#"{"page": 2, "pageSize": 50}"#).unwrap();
    assert_eq!(state, PageState::new(2, 50).unwrap());
    assert!(serde_json::from_str::<PageState>(r#"{"page": 0, "pageSize": 0}"#).is_err());
}

// ── Labels ───────────────────────────────────────────────────────

#[test]
fn range_label_uses_default_template() {
    let chain = TranslationChain::with_defaults();
    let info = PageInfo::compute(9, size(10), 95);
    assert_eq!(info.range_label(&chain), "91–95 of 95");
    assert_eq!(PageInfo::compute(0, size(10), 0).range_label(&chain), "0–0 of 0");
}

#[test]
fn range_label_honours_overrides() {
    let chain = TranslationChain::with_defaults()
        .prepend(TranslationTable::new("de").with_entry("pagination.range", "{from}–{to} von {count}"));
    assert_eq!(PageInfo::compute(1, size(10), 12).range_label(&chain), "11–12 von 12");

    let custom = |key: &str, params: &[(&str, &str)]| format!("{key}:{}", params.len());
    assert_eq!(PageInfo::compute(0, size(10), 3).range_label(&custom), "pagination.range:3");
}
