//! Bookstore profit model
//!
//! Single-period perishable-product problem: place one order for the year at
//! a known unit cost, sell at a known price, and receive a partial refund
//! for each unsold item. Demand in excess of the order quantity is lost.
//! Every input is scalar-or-array valued, so the same model serves data
//! tables and replicated simulations.

use whatif_core::{Model, ModelError, Value};

#[derive(Debug, Clone)]
pub struct BookstoreModel {
    /// Cost for each item ordered
    pub unit_cost: Value,
    /// Selling price for each item
    pub selling_price: Value,
    /// Refund received per unsold item
    pub unit_refund: Value,
    /// Number of items in the single yearly order
    pub order_quantity: Value,
    /// Number of items demanded by customers
    pub demand: Value,
}

impl Default for BookstoreModel {
    fn default() -> Self {
        Self {
            unit_cost: Value::Scalar(7.50),
            selling_price: Value::Scalar(10.00),
            unit_refund: Value::Scalar(2.50),
            order_quantity: Value::Scalar(200.0),
            demand: Value::Scalar(193.0),
        }
    }
}

impl BookstoreModel {
    /// Total cost of the one order
    fn order_cost(&self) -> Value {
        &self.unit_cost * &self.order_quantity
    }

    /// Items sold; excess demand is lost
    fn num_sold(&self) -> Value {
        self.order_quantity.minimum(&self.demand)
    }

    /// Revenue from items sold at the selling price
    fn sales_revenue(&self) -> Value {
        &self.num_sold() * &self.selling_price
    }

    /// Items ordered but not sold
    fn num_unsold(&self) -> Value {
        (&self.order_quantity - &self.demand).maximum(&Value::Scalar(0.0))
    }

    /// Revenue from refunds on unsold items
    fn refund_revenue(&self) -> Value {
        &self.num_unsold() * &self.unit_refund
    }

    fn total_revenue(&self) -> Value {
        self.sales_revenue() + self.refund_revenue()
    }

    fn profit(&self) -> Value {
        self.sales_revenue() + self.refund_revenue() - self.order_cost()
    }
}

impl Model for BookstoreModel {
    fn attribute_names(&self) -> &'static [&'static str] {
        &[
            "unit_cost",
            "selling_price",
            "unit_refund",
            "order_quantity",
            "demand",
        ]
    }

    fn get_attribute(&self, name: &str) -> Result<Value, ModelError> {
        match name {
            "unit_cost" => Ok(self.unit_cost.clone()),
            "selling_price" => Ok(self.selling_price.clone()),
            "unit_refund" => Ok(self.unit_refund.clone()),
            "order_quantity" => Ok(self.order_quantity.clone()),
            "demand" => Ok(self.demand.clone()),
            _ => Err(ModelError::UnknownAttribute(name.to_string())),
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "unit_cost" => self.unit_cost = value,
            "selling_price" => self.selling_price = value,
            "unit_refund" => self.unit_refund = value,
            "order_quantity" => self.order_quantity = value,
            "demand" => self.demand = value,
            _ => return Err(ModelError::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }

    fn invoke_output(&self, name: &str) -> Result<Value, ModelError> {
        match name {
            "order_cost" => Ok(self.order_cost()),
            "num_sold" => Ok(self.num_sold()),
            "sales_revenue" => Ok(self.sales_revenue()),
            "num_unsold" => Ok(self.num_unsold()),
            "refund_revenue" => Ok(self.refund_revenue()),
            "total_revenue" => Ok(self.total_revenue()),
            "profit" => Ok(self.profit()),
            _ => Err(ModelError::UnknownOutput(name.to_string())),
        }
    }
}
