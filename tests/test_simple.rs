use gestor_empleados::DepartmentStore;

#[test]
fn test_simple() -> anyhow::Result<()> {
    let store = DepartmentStore::new();
    assert_eq!(store.find_all().len(), 0);
    Ok(())
}
