use std::sync::Arc;

use twine_core::Model;

use super::{DesignPoint, DesignPointConfig, DesignPointError, Snapshot};
use crate::models::propulsion::propeller::PropellerModel;

/// Flight performance as a [`Model`] from aircraft inputs to a [`Snapshot`].
///
/// Every call builds a fresh [`DesignPoint`] against the bound propeller.
#[derive(Debug, Clone)]
pub struct FlightPerformance {
    propeller: Arc<PropellerModel>,
}

impl FlightPerformance {
    #[must_use]
    pub fn new(propeller: Arc<PropellerModel>) -> Self {
        Self { propeller }
    }

    #[must_use]
    pub fn propeller(&self) -> &Arc<PropellerModel> {
        &self.propeller
    }
}

impl Model for FlightPerformance {
    type Input = DesignPointConfig;
    type Output = Snapshot;
    type Error = DesignPointError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        DesignPoint::new(*input, Arc::clone(&self.propeller)).map(|point| point.snapshot())
    }
}
