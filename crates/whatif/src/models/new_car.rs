//! New-car development NPV model
//!
//! Multi-year product launch: a fixed development cost, a unit margin that
//! decays by a known rate each year, first-year demand that decays year over
//! year, straight-line depreciation, and a fixed tax rate. The headline
//! output is the NPV of the resulting cash-flow stream with the development
//! cost as the year-0 outflow.
//!
//! `yr1_demand` and `demand_decr` may be per-replication arrays (one entry
//! per simulated trial); the remaining inputs must be scalar.

use whatif_core::{Model, ModelError, Value};

#[derive(Debug, Clone)]
pub struct NewCarModel {
    /// Development cost, spent up front
    pub fixed_dev_cost: Value,
    /// Unit margin in year 1
    pub base_margin: Value,
    /// Fractional annual decrease in unit margin
    pub annual_margin_decr: Value,
    /// Demand in year 1
    pub yr1_demand: Value,
    /// Fractional annual decrease in demand
    pub demand_decr: Value,
    /// Tax rate applied to before-tax profit
    pub tax_rate: Value,
    /// Discount rate for the NPV calculation
    pub discount_rate: Value,
    /// Number of years in the model
    pub num_years: Value,
}

impl Default for NewCarModel {
    fn default() -> Self {
        Self {
            fixed_dev_cost: Value::Scalar(600e6),
            base_margin: Value::Scalar(4e3),
            annual_margin_decr: Value::Scalar(0.04),
            yr1_demand: Value::Scalar(53_560.0),
            demand_decr: Value::Scalar(0.077),
            tax_rate: Value::Scalar(0.21),
            discount_rate: Value::Scalar(0.07),
            num_years: Value::Scalar(5.0),
        }
    }
}

impl NewCarModel {
    fn scalar(value: &Value, name: &str) -> Result<f64, ModelError> {
        value.as_scalar().ok_or_else(|| ModelError::InvalidAttribute {
            name: name.to_string(),
            reason: "must be scalar".to_string(),
        })
    }

    fn num_years(&self) -> Result<usize, ModelError> {
        let years = Self::scalar(&self.num_years, "num_years")?;
        if years < 1.0 {
            return Err(ModelError::InvalidAttribute {
                name: "num_years".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(years as usize)
    }

    /// Expand `yr1_demand` and `demand_decr` to one entry per replication.
    /// Returns the pairs plus whether both inputs were scalar (in which case
    /// outputs stay scalar).
    fn replication_inputs(&self) -> Result<(Vec<f64>, Vec<f64>, bool), ModelError> {
        let n = match (self.yr1_demand.replications(), self.demand_decr.replications()) {
            (None, None) => return Ok((
                vec![Self::scalar(&self.yr1_demand, "yr1_demand")?],
                vec![Self::scalar(&self.demand_decr, "demand_decr")?],
                true,
            )),
            (Some(n), None) | (None, Some(n)) => n,
            (Some(a), Some(b)) if a == b => a,
            (Some(a), Some(b)) => {
                return Err(ModelError::InvalidAttribute {
                    name: "demand_decr".to_string(),
                    reason: format!("has {b} replications, yr1_demand has {a}"),
                });
            }
        };

        let expand = |value: &Value| -> Vec<f64> {
            match value {
                Value::Scalar(x) => vec![*x; n],
                Value::Array(values) => values.clone(),
            }
        };
        Ok((expand(&self.yr1_demand), expand(&self.demand_decr), false))
    }

    /// Unit contribution by year, decaying from the base margin
    fn unit_contribution(&self) -> Result<Vec<f64>, ModelError> {
        let years = self.num_years()?;
        let base = Self::scalar(&self.base_margin, "base_margin")?;
        let decay = Self::scalar(&self.annual_margin_decr, "annual_margin_decr")?;
        Ok((0..years).map(|t| base * (1.0 - decay).powi(t as i32)).collect())
    }

    /// Cash flow by year for one replication: after-tax profit plus the
    /// depreciation added back
    fn cash_flows(&self, yr1_demand: f64, demand_decr: f64) -> Result<Vec<f64>, ModelError> {
        let years = self.num_years()?;
        let dev_cost = Self::scalar(&self.fixed_dev_cost, "fixed_dev_cost")?;
        let tax_rate = Self::scalar(&self.tax_rate, "tax_rate")?;
        let contribution = self.unit_contribution()?;
        let depreciation = dev_cost / years as f64;

        let mut flows = Vec::with_capacity(years);
        let mut sales = yr1_demand;
        for (t, unit) in contribution.iter().enumerate() {
            if t > 0 {
                sales *= 1.0 - demand_decr;
            }
            let net_revenue = sales * unit;
            let before_tax = net_revenue - depreciation;
            let after_tax = before_tax * (1.0 - tax_rate);
            flows.push(after_tax + depreciation);
        }
        Ok(flows)
    }

    /// NPV per replication: development cost as the year-0 outflow, yearly
    /// cash flows discounted from year 1
    fn npv(&self) -> Result<Value, ModelError> {
        let dev_cost = Self::scalar(&self.fixed_dev_cost, "fixed_dev_cost")?;
        let rate = Self::scalar(&self.discount_rate, "discount_rate")?;
        let (demands, decays, scalar_inputs) = self.replication_inputs()?;

        let mut npvs = Vec::with_capacity(demands.len());
        for (&d, &decay) in demands.iter().zip(&decays) {
            let discounted: f64 = self
                .cash_flows(d, decay)?
                .iter()
                .enumerate()
                .map(|(t, cf)| cf / (1.0 + rate).powi(t as i32 + 1))
                .sum();
            npvs.push(discounted - dev_cost);
        }

        if scalar_inputs {
            Ok(Value::Scalar(npvs[0]))
        } else {
            Ok(Value::Array(npvs))
        }
    }

    /// Undiscounted sum of the yearly cash flows, per replication
    fn total_cash_flow(&self) -> Result<Value, ModelError> {
        let (demands, decays, scalar_inputs) = self.replication_inputs()?;

        let mut totals = Vec::with_capacity(demands.len());
        for (&d, &decay) in demands.iter().zip(&decays) {
            totals.push(self.cash_flows(d, decay)?.iter().sum());
        }

        if scalar_inputs {
            Ok(Value::Scalar(totals[0]))
        } else {
            Ok(Value::Array(totals))
        }
    }
}

impl Model for NewCarModel {
    fn attribute_names(&self) -> &'static [&'static str] {
        &[
            "fixed_dev_cost",
            "base_margin",
            "annual_margin_decr",
            "yr1_demand",
            "demand_decr",
            "tax_rate",
            "discount_rate",
            "num_years",
        ]
    }

    fn get_attribute(&self, name: &str) -> Result<Value, ModelError> {
        match name {
            "fixed_dev_cost" => Ok(self.fixed_dev_cost.clone()),
            "base_margin" => Ok(self.base_margin.clone()),
            "annual_margin_decr" => Ok(self.annual_margin_decr.clone()),
            "yr1_demand" => Ok(self.yr1_demand.clone()),
            "demand_decr" => Ok(self.demand_decr.clone()),
            "tax_rate" => Ok(self.tax_rate.clone()),
            "discount_rate" => Ok(self.discount_rate.clone()),
            "num_years" => Ok(self.num_years.clone()),
            _ => Err(ModelError::UnknownAttribute(name.to_string())),
        }
    }

    fn set_attribute(&mut self, name: &str, value: Value) -> Result<(), ModelError> {
        match name {
            "fixed_dev_cost" => self.fixed_dev_cost = value,
            "base_margin" => self.base_margin = value,
            "annual_margin_decr" => self.annual_margin_decr = value,
            "yr1_demand" => self.yr1_demand = value,
            "demand_decr" => self.demand_decr = value,
            "tax_rate" => self.tax_rate = value,
            "discount_rate" => self.discount_rate = value,
            "num_years" => self.num_years = value,
            _ => return Err(ModelError::UnknownAttribute(name.to_string())),
        }
        Ok(())
    }

    fn invoke_output(&self, name: &str) -> Result<Value, ModelError> {
        match name {
            "npv" => self.npv(),
            "total_cash_flow" => self.total_cash_flow(),
            _ => Err(ModelError::UnknownOutput(name.to_string())),
        }
    }
}
