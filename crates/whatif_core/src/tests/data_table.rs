//! Grid-sweep tests through the retail fixture

use crate::drivers::data_table;
use crate::grid::ScenarioInputs;
use crate::value::Value;

use super::fixtures::RetailModel;

#[test]
fn test_two_way_table_has_full_product() {
    let model = RetailModel::default();
    let inputs = ScenarioInputs::new()
        .with("order_quantity", [100.0, 150.0, 200.0])
        .with("selling_price", [9.0, 10.0, 11.0, 12.0]);

    let table = data_table(&model, &inputs, &["profit"]).unwrap();

    assert_eq!(table.len(), 12);
    assert_eq!(table.columns(), ["order_quantity", "selling_price", "profit"]);
}

#[test]
fn test_profit_values_match_hand_calculation() {
    let model = RetailModel::default();
    let inputs = ScenarioInputs::new().with("order_quantity", [100.0, 200.0]);

    let table = data_table(&model, &inputs, &["profit"]).unwrap();

    // Demand 193 fixed. At 100 ordered everything sells:
    // 100*10 - 100*7.5 = 250. At 200 ordered, 193 sell and 7 are refunded:
    // 1930 + 17.5 - 1500 = 447.5.
    assert_eq!(table.scalar_column("profit").unwrap(), vec![250.0, 447.5]);
}

#[test]
fn test_rows_follow_generation_order() {
    let model = RetailModel::default();
    let inputs = ScenarioInputs::new()
        .with("order_quantity", [100.0, 200.0])
        .with("selling_price", [9.0, 11.0]);

    let table = data_table(&model, &inputs, &["num_sold"]).unwrap();

    let quantities = table.scalar_column("order_quantity").unwrap();
    let prices = table.scalar_column("selling_price").unwrap();
    assert_eq!(quantities, vec![100.0, 100.0, 200.0, 200.0]);
    assert_eq!(prices, vec![9.0, 11.0, 9.0, 11.0]);
}

#[test]
fn test_unswept_attributes_keep_constructed_values() {
    let mut model = RetailModel::default();
    model.unit_refund = Value::Scalar(5.0);
    let inputs = ScenarioInputs::new().with("order_quantity", [200.0]);

    let table = data_table(&model, &inputs, &["profit"]).unwrap();

    // 193 sold, 7 unsold at the raised refund: 1930 + 35 - 1500
    assert_eq!(table.scalar_column("profit").unwrap(), vec![465.0]);
}

#[test]
fn test_multiple_outputs_share_the_scenario() {
    let model = RetailModel::default();
    let inputs = ScenarioInputs::new().with("demand", [50.0, 250.0]);

    let table = data_table(&model, &inputs, &["num_sold", "num_unsold"]).unwrap();

    assert_eq!(table.scalar_column("num_sold").unwrap(), vec![50.0, 200.0]);
    assert_eq!(table.scalar_column("num_unsold").unwrap(), vec![150.0, 0.0]);
}
