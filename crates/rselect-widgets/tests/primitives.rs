//! Integration tests for the button, checkbox and item table primitives.

use rselect_test::Harness;
use rselect_widgets::{
    identity_theme, AllItemsToggled, Button, ButtonClicked, CheckState, Checkbox,
    CheckboxChanged, ItemAddRequested, ItemTable, ItemToggled, TableItem,
};

#[test]
fn test_button_click_through_harness() {
    let mut h = Harness::new(Button::new("Save").with_test_id("save")).with_theme(identity_theme());
    h.assert_text("#save .content", "Save");
    h.click("#save");
    assert_eq!(h.messages_of::<ButtonClicked>().len(), 1);
}

#[test]
fn test_button_in_progress_ignores_clicks() {
    let mut h = Harness::new(Button::new("Save").progress(true)).with_theme(identity_theme());
    h.assert_text(".content", "loading...");
    h.assert_exists("button.progressBtn[disabled]");
    h.click("button");
    assert!(h.messages().is_empty());
}

#[test]
fn test_checkbox_cycle() {
    let mut h = Harness::new(Checkbox::new().label("Remember").name("remember"))
        .with_theme(identity_theme());
    h.click(".check");
    h.assert_exists(".check.checked");
    h.click(".text");
    h.assert_not_exists(".check.checked");

    let states: Vec<CheckState> = h
        .messages_of::<CheckboxChanged>()
        .iter()
        .map(|m| m.state)
        .collect();
    assert_eq!(states, [CheckState::Checked, CheckState::Unchecked]);
}

#[test]
fn test_item_table_flow() {
    let table = ItemTable::new().with_test_id("kpis").items([
        TableItem::new("a", "Revenue"),
        TableItem::new("b", "Churn"),
    ]);
    let mut h = Harness::new(table).with_theme(identity_theme());

    h.click("#kpis tr[data-value='a']");
    assert_eq!(h.widget().selected_ids(), ["a"]);
    h.assert_exists("th .check.indeterminate");
    h.assert_count("tr.selectedItem", 1);

    h.click("th[data-part='toggle-all']");
    assert_eq!(h.widget().selected_ids(), ["a", "b"]);
    h.assert_exists("th .check.checked");

    h.click("th[data-part='toggle-all']");
    assert!(h.widget().selected_ids().is_empty());

    h.click(".tableButton");
    assert!(h.last_message::<ItemAddRequested>().is_some());
    assert_eq!(h.messages_of::<ItemToggled>().len(), 1);
    assert_eq!(h.messages_of::<AllItemsToggled>().len(), 2);
}

#[test]
fn test_item_table_empty() {
    let h = Harness::new(ItemTable::new()).with_theme(identity_theme());
    h.assert_text(".noMatching", "No matching items found");
    h.assert_text(".tableButton .content", "ADD ITEM");
}
