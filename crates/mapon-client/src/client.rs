//! Mapon HTTP client implementation

use std::fmt;
use std::sync::Arc;

use mapon_core::{
    Alert, CanDataPoint, Driver, DrivingTime, Object, Route, Unit, UnitCanPeriod, UnitDebugInfo,
    UnitDigitalInputs, UnitDigitalInputsExtended, UnitFields, UnitGroup, UnitHistoryPoint,
    UnitHumidity, UnitIbuttons, UnitIgnitions, UnitTellTales, UnitTemperatures,
};
use tracing::{debug, instrument};
use url::Url;

use crate::config::{endpoint_url, ClientConfig};
use crate::error::{MaponClientError, Result};
use crate::request::*;
use crate::transport::{HttpRequest, ReqwestTransport, Transport};

/// Mapon REST API client
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct MaponClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
    base_url: Url,
}

impl fmt::Debug for MaponClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaponClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MaponClient {
    /// Create a client for the public API with the given key
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_config(ClientConfig::new().with_api_key(api_key))
    }

    /// Create a client backed by [`ReqwestTransport`]
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Self::with_transport(config, Arc::new(transport))
    }

    /// Create a client on top of a custom transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        let base_url = config.validate()?;
        Ok(Self {
            transport,
            config,
            base_url,
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Fleet
    // =========================================================================

    /// List units (vehicles and other assets) with their latest state
    #[instrument(skip(self))]
    pub async fn list_units(&self, request: &ListUnitsRequest) -> Result<Vec<Unit>> {
        self.execute(request).await
    }

    /// List drivers
    #[instrument(skip(self))]
    pub async fn list_drivers(&self, request: &ListDriversRequest) -> Result<Vec<Driver>> {
        self.execute(request).await
    }

    /// List routes driven in a time range, flattened across units
    #[instrument(skip(self))]
    pub async fn list_routes(&self, request: &ListRoutesRequest) -> Result<Vec<Route>> {
        self.execute(request).await
    }

    /// List objects (points of interest)
    #[instrument(skip(self))]
    pub async fn list_objects(&self) -> Result<Vec<Object>> {
        self.execute(&ListObjectsRequest).await
    }

    /// List triggered alerts, always with location, address and driver
    #[instrument(skip(self))]
    pub async fn list_alerts(&self, request: &ListAlertsRequest) -> Result<Vec<Alert>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_unit_groups(&self, request: &ListUnitGroupsRequest) -> Result<Vec<UnitGroup>> {
        self.execute(request).await
    }

    /// IDs of the units in a group
    #[instrument(skip(self))]
    pub async fn list_units_in_group(&self, request: &ListUnitsInGroupRequest) -> Result<Vec<i64>> {
        self.execute(request).await
    }

    /// Dashboard tell-tale history of one unit
    #[instrument(skip(self))]
    pub async fn list_tell_tale_values(
        &self,
        request: &ListTellTaleValuesRequest,
    ) -> Result<UnitTellTales> {
        self.execute(request).await
    }

    // =========================================================================
    // Unit Data
    // =========================================================================

    /// CAN metrics of one unit at an instant
    #[instrument(skip(self))]
    pub async fn get_can_point_data(
        &self,
        request: &GetCanPointDataRequest,
    ) -> Result<Vec<CanDataPoint>> {
        self.execute(request).await
    }

    /// CAN metric series of one unit over a time range
    #[instrument(skip(self))]
    pub async fn list_can_period_data(
        &self,
        request: &ListCanPeriodDataRequest,
    ) -> Result<Vec<UnitCanPeriod>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_unit_debug_info(
        &self,
        request: &GetUnitDebugInfoRequest,
    ) -> Result<Vec<UnitDebugInfo>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_digital_inputs(
        &self,
        request: &ListDigitalInputsRequest,
    ) -> Result<Vec<UnitDigitalInputs>> {
        self.execute(request).await
    }

    /// Digital input state changes with input labels and locations
    #[instrument(skip(self))]
    pub async fn list_digital_inputs_extended(
        &self,
        request: &ListDigitalInputsExtendedRequest,
    ) -> Result<Vec<UnitDigitalInputsExtended>> {
        self.execute(request).await
    }

    /// Tachograph driving and rest time per driver
    #[instrument(skip(self))]
    pub async fn get_driving_time_extended(
        &self,
        request: &GetDrivingTimeExtendedRequest,
    ) -> Result<Vec<DrivingTime>> {
        self.execute(request).await
    }

    /// Custom field values of a unit
    #[instrument(skip(self))]
    pub async fn get_unit_fields(&self, request: &GetUnitFieldsRequest) -> Result<Vec<UnitFields>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn get_history_point_data(
        &self,
        request: &GetHistoryPointDataRequest,
    ) -> Result<Vec<UnitHistoryPoint>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_humidity(&self, request: &ListHumidityRequest) -> Result<Vec<UnitHumidity>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_ibuttons(&self, request: &ListIbuttonsRequest) -> Result<Vec<UnitIbuttons>> {
        self.execute(request).await
    }

    /// Ignition on/off events
    #[instrument(skip(self))]
    pub async fn list_ignitions(&self, request: &ListIgnitionsRequest) -> Result<Vec<UnitIgnitions>> {
        self.execute(request).await
    }

    #[instrument(skip(self))]
    pub async fn list_temperatures(
        &self,
        request: &ListTemperaturesRequest,
    ) -> Result<Vec<UnitTemperatures>> {
        self.execute(request).await
    }

    // =========================================================================
    // Helper Methods
    // =========================================================================

    /// Run one endpoint: encode, send, check status, decode.
    ///
    /// Every error is tagged with the endpoint's operation name.
    pub async fn execute<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output> {
        self.execute_inner(endpoint)
            .await
            .map_err(|e| e.in_operation(E::OPERATION))
    }

    async fn execute_inner<E: Endpoint>(&self, endpoint: &E) -> Result<E::Output> {
        let mut url = endpoint_url(&self.base_url, E::PATH)?;
        let mut params = endpoint.query();
        debug!("GET {}?{}", url, params.encode());

        if let Some(key) = &self.config.api_key {
            params.push("key", key);
        }
        if !params.is_empty() {
            url.set_query(Some(&params.encode()));
        }

        let response = self.transport.send(HttpRequest::get(url)).await?;
        debug!(
            status = response.status,
            bytes = response.body.len(),
            "Response from {}",
            E::PATH
        );
        if self.config.debug {
            debug!("Response body: {}", String::from_utf8_lossy(&response.body));
        }

        if response.status != 200 {
            return Err(MaponClientError::HttpStatus {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(endpoint.decode(&response.body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MaponClient::new("test-key");
        assert!(client.is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let client = MaponClient::with_config(ClientConfig::new().with_base_url("not a url"));
        assert!(client.is_err());
    }

    #[test]
    fn test_default_base_url() {
        let client = MaponClient::new("test-key").unwrap();
        assert_eq!(client.base_url().as_str(), "https://mapon.com/api/v1");
    }

    #[test]
    fn test_debug_hides_key() {
        let client = MaponClient::new("very-secret").unwrap();
        assert!(!format!("{:?}", client).contains("very-secret"));
    }
}
