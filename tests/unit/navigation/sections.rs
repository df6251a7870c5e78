use super::*;

fn page() -> SectionList {
    SectionList::from_offsets(&[0.0, 900.0, 1800.0, 2700.0]).unwrap()
}

fn active_count(list: &SectionList) -> usize {
    list.as_slice().iter().filter(|s| s.is_active).count()
}

#[test]
fn exactly_one_section_is_active() {
    let mut list = page();
    assert_eq!(active_count(&list), 1);
    assert_eq!(list.active_index(), 0);
    list.activate(2);
    assert_eq!(active_count(&list), 1);
    assert_eq!(list.active_index(), 2);
    list.activate(99);
    assert_eq!(list.active_index(), 3);
}

#[test]
fn empty_page_is_rejected() {
    assert!(SectionList::from_offsets(&[]).is_err());
}

#[test]
fn position_discretizes_with_tolerance() {
    let list = page();
    assert_eq!(list.index_for_position(0.0, 100.0), 0);
    assert_eq!(list.index_for_position(799.0, 100.0), 0);
    assert_eq!(list.index_for_position(800.0, 100.0), 1);
    assert_eq!(list.index_for_position(5000.0, 100.0), 3);
}

#[test]
fn recompute_updates_offsets_in_place() {
    let mut list = page();
    list.activate(1);
    list.recompute(&[0.0, 700.0, 1400.0, 2100.0]);
    assert_eq!(list.get(2).unwrap().dom_offset, 1400.0);
    assert_eq!(list.active_index(), 1);
}
