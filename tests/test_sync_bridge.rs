//! Integration tests for keeping the table view and edit selection in step
//! with the department store.

mod common;

use common::*;

fn bridge_over(store: &DepartmentStore) -> SyncBridge<Vec<TableRow>> {
    let mut bridge = SyncBridge::new(Vec::new());
    bridge.refresh(store);
    bridge
}

fn row_ids(bridge: &SyncBridge<Vec<TableRow>>) -> Vec<i64> {
    bridge.view().iter().map(|row| row.id).collect()
}

#[test]
fn test_refresh_renders_every_record() -> anyhow::Result<()> {
    let mut store = DepartmentStore::new();
    store.add(it_department())?;
    let bridge = bridge_over(&store);

    assert_eq!(
        bridge.view()[0].cells,
        ["1000", "IT", "5", "10000.00", "160"].map(String::from)
    );
    assert_eq!(bridge.state(), EditState::Idle);
    Ok(())
}

#[test]
fn test_create_refreshes_view() -> anyhow::Result<()> {
    let mut store = store_with(&[1]);
    let mut bridge = bridge_over(&store);

    bridge.create(&mut store, sales_department(2))?;

    assert_eq!(row_ids(&bridge), vec![1, 2]);
    Ok(())
}

#[test]
fn test_rejected_create_keeps_view_and_selection() -> anyhow::Result<()> {
    let mut store = store_with(&[1]);
    let mut bridge = bridge_over(&store);
    bridge.select(&store, 1);

    let result = bridge.create(&mut store, sales_department(1));

    assert_eq!(result, Err(Notice::Rejected(Rejection::DuplicateId(1))));
    assert_eq!(row_ids(&bridge), vec![1]);
    assert_eq!(bridge.state(), EditState::Selected(1));
    Ok(())
}

#[test]
fn test_select_then_update_follows_new_id() -> anyhow::Result<()> {
    let mut store = DepartmentStore::new();
    store.add(it_department())?;
    let mut bridge = bridge_over(&store);

    let picked = bridge.select(&store, 1000).cloned();
    assert_eq!(picked, Some(it_department()));

    let new_id = bridge.update(&mut store, sales_department(2000))?;

    assert_eq!(new_id, 2000);
    assert_eq!(bridge.state(), EditState::Selected(2000));
    assert_eq!(row_ids(&bridge), vec![2000]);
    Ok(())
}

#[test]
fn test_update_without_selection_is_empty_selection() -> anyhow::Result<()> {
    let mut store = store_with(&[1]);
    let mut bridge = bridge_over(&store);

    let result = bridge.update(&mut store, sales_department(1));

    assert_eq!(result, Err(Notice::EmptySelection));
    assert_eq!(store.find(1).map(|d| d.name.as_str()), Some("Desarrollo"));
    Ok(())
}

#[test]
fn test_rejected_update_stays_selected() -> anyhow::Result<()> {
    let mut store = store_with(&[1, 2]);
    let mut bridge = bridge_over(&store);
    bridge.select(&store, 1);

    let result = bridge.update(&mut store, sales_department(2));

    assert_eq!(result, Err(Notice::Rejected(Rejection::DuplicateId(2))));
    assert_eq!(bridge.state(), EditState::Selected(1));
    Ok(())
}

#[test]
fn test_update_of_vanished_record_clears_selection() -> anyhow::Result<()> {
    let mut store = store_with(&[1, 2]);
    let mut bridge = bridge_over(&store);
    bridge.select(&store, 1);
    store.remove(1);

    let result = bridge.update(&mut store, sales_department(1));

    assert_eq!(result, Err(Notice::Rejected(Rejection::NotFound(1))));
    assert_eq!(bridge.state(), EditState::Idle);
    assert_eq!(row_ids(&bridge), vec![2]);
    Ok(())
}

#[test]
fn test_delete_acts_on_picked_row() -> anyhow::Result<()> {
    let mut store = store_with(&[1, 2, 3]);
    let mut bridge = bridge_over(&store);
    bridge.select(&store, 1);

    bridge.delete(&mut store, Some(3))?;

    assert_eq!(row_ids(&bridge), vec![1, 2]);
    assert_eq!(bridge.state(), EditState::Selected(1));

    bridge.delete(&mut store, Some(1))?;

    assert_eq!(row_ids(&bridge), vec![2]);
    assert_eq!(bridge.state(), EditState::Idle);
    Ok(())
}

#[test]
fn test_delete_without_pick_is_empty_selection() -> anyhow::Result<()> {
    let mut store = store_with(&[1]);
    let mut bridge = bridge_over(&store);

    assert_eq!(bridge.delete(&mut store, None), Err(Notice::EmptySelection));
    assert_eq!(store.len(), 1);
    Ok(())
}

#[test]
fn test_select_unknown_id_keeps_state() -> anyhow::Result<()> {
    let store = store_with(&[1]);
    let mut bridge = bridge_over(&store);

    assert!(bridge.select(&store, 77).is_none());
    assert_eq!(bridge.state(), EditState::Idle);
    Ok(())
}
