use super::device::non_empty;
use crate::models::requests::SensorDataQuery;
use crate::transport::HttpTransport;
use crate::{Envelope, NetroClient, NetroResult};

/// Provides methods for Netro Whisperer soil sensors.
///
/// Use [`DeviceApi::get_info`](crate::DeviceApi::get_info) for the sensor's
/// own status and battery level.
pub struct SensorApi<'a, T> {
    client: &'a NetroClient<T>,
}

impl<'a, T: HttpTransport> SensorApi<'a, T> {
    pub(crate) fn new(client: &'a NetroClient<T>) -> Self {
        Self { client }
    }

    /// Lists sensor readings (moisture, temperature, sunlight), optionally
    /// within a date range.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &netro_client::NetroClient<netro_client::ReqwestTransport>) -> netro_client::NetroResult<()> {
    /// let readings = client
    ///     .sensors()
    ///     .get_sensor_data("1234567890AB")
    ///     .start_date("2024-06-01")
    ///     .end_date("2024-06-07")
    ///     .send()
    ///     .await?;
    /// println!("{:?}", readings.data());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_sensor_data(&self, serial: impl Into<String>) -> SensorDataBuilder<'a, T> {
        SensorDataBuilder {
            client: self.client,
            query: SensorDataQuery {
                key: serial.into(),
                ..Default::default()
            },
        }
    }
}

/// Request builder for `sensor_data.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct SensorDataBuilder<'a, T> {
    client: &'a NetroClient<T>,
    query: SensorDataQuery,
}

impl<'a, T: HttpTransport> SensorDataBuilder<'a, T> {
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.query.start_date = non_empty(date);
        self
    }

    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.query.end_date = non_empty(date);
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.get("sensor_data.json", &self.query).await
    }
}
