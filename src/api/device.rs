use crate::models::requests::{
    EventsQuery, KeyRequest, NoWaterRequest, ReportWeatherRequest, SetMoistureRequest,
    SetStatusRequest, WaterRequest, ZoneHistoryQuery,
};
use crate::transport::HttpTransport;
use crate::{Envelope, NetroClient, NetroResult};

/// Provides methods for Netro controllers (Sprite, Pixie) and for device
/// information shared with sensors.
///
/// Every method takes the device serial, which the API uses as its key.
pub struct DeviceApi<'a, T> {
    client: &'a NetroClient<T>,
}

impl<'a, T: HttpTransport> DeviceApi<'a, T> {
    /// Creates a new device API instance.
    ///
    /// This method is intended for internal use by the Netro client.
    pub(crate) fn new(client: &'a NetroClient<T>) -> Self {
        Self { client }
    }

    /// Retrieves information about a controller or a sensor.
    ///
    /// Controllers answer with `data.device` (zones, status, ...), sensors
    /// with `data.sensor` (battery level, ...).
    ///
    /// # Errors
    ///
    /// Returns [`NetroError::AuthenticationError`](crate::NetroError::AuthenticationError)
    /// if the serial is rejected, or any other error if the request fails or
    /// the API returns an error envelope.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &netro_client::NetroClient<netro_client::ReqwestTransport>) -> netro_client::NetroResult<()> {
    /// let info = client.devices().get_info("ABCDEF123456").await?;
    /// if let Some(device) = info.data().and_then(|data| data.get("device")) {
    ///     println!("Controller: {}", device["name"]);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn get_info(&self, serial: impl Into<String>) -> NetroResult<Envelope> {
        self.client.get("info.json", &KeyRequest::new(serial)).await
    }

    /// Lists watering schedules, optionally filtered by date range and zones.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &netro_client::NetroClient<netro_client::ReqwestTransport>) -> netro_client::NetroResult<()> {
    /// let schedules = client
    ///     .devices()
    ///     .get_schedules("ABCDEF123456")
    ///     .start_date("2024-06-01")
    ///     .zones([1, 2])
    ///     .send()
    ///     .await?;
    /// println!("{:?}", schedules.data());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_schedules(&self, serial: impl Into<String>) -> ZoneHistoryBuilder<'a, T> {
        ZoneHistoryBuilder::new(self.client, "schedules.json", serial)
    }

    /// Lists moisture readings, optionally filtered by date range and zones.
    pub fn get_moistures(&self, serial: impl Into<String>) -> ZoneHistoryBuilder<'a, T> {
        ZoneHistoryBuilder::new(self.client, "moistures.json", serial)
    }

    /// Lists device events, optionally filtered by event type and date range.
    pub fn get_events(&self, serial: impl Into<String>) -> EventsBuilder<'a, T> {
        EventsBuilder {
            client: self.client,
            query: EventsQuery {
                key: serial.into(),
                ..Default::default()
            },
        }
    }

    /// Enables the controller or puts it on standby.
    ///
    /// Without [`enabled`](SetStatusBuilder::enabled) only the key is sent.
    pub fn set_status(&self, serial: impl Into<String>) -> SetStatusBuilder<'a, T> {
        SetStatusBuilder {
            client: self.client,
            request: SetStatusRequest {
                key: serial.into(),
                status: None,
            },
        }
    }

    /// Starts watering for `duration_minutes`.
    ///
    /// All zones are watered unless [`zones`](WaterBuilder::zones) is set.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &netro_client::NetroClient<netro_client::ReqwestTransport>) -> netro_client::NetroResult<()> {
    /// // Water zones 1 and 2 for 30 minutes, starting in 5 minutes.
    /// client
    ///     .devices()
    ///     .water("ABCDEF123456", 30)
    ///     .zones([1, 2])
    ///     .delay_minutes(5)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn water(&self, serial: impl Into<String>, duration_minutes: u32) -> WaterBuilder<'a, T> {
        WaterBuilder {
            client: self.client,
            request: WaterRequest {
                key: serial.into(),
                duration: duration_minutes,
                ..Default::default()
            },
        }
    }

    /// Stops any watering in progress.
    pub async fn stop_water(&self, serial: impl Into<String>) -> NetroResult<Envelope> {
        self.client.post("stop_water.json", &KeyRequest::new(serial)).await
    }

    /// Suspends watering for a number of days (one unless
    /// [`days`](NoWaterBuilder::days) is set).
    pub fn no_water(&self, serial: impl Into<String>) -> NoWaterBuilder<'a, T> {
        NoWaterBuilder {
            client: self.client,
            request: NoWaterRequest {
                key: serial.into(),
                days: 1,
            },
        }
    }

    /// Reports the current soil moisture (percent) for some or all zones.
    pub fn set_moisture(&self, serial: impl Into<String>, moisture: u32) -> SetMoistureBuilder<'a, T> {
        SetMoistureBuilder {
            client: self.client,
            request: SetMoistureRequest {
                key: serial.into(),
                moisture,
                zones: None,
            },
        }
    }

    /// Reports local weather for `date` (`YYYY-MM-DD`).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # async fn example(client: &netro_client::NetroClient<netro_client::ReqwestTransport>) -> netro_client::NetroResult<()> {
    /// client
    ///     .devices()
    ///     .report_weather("ABCDEF123456", "2024-06-01")
    ///     .rain(2.5)
    ///     .rain_prob(80)
    ///     .temp(18.0)
    ///     .send()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn report_weather(
        &self,
        serial: impl Into<String>,
        date: impl Into<String>,
    ) -> ReportWeatherBuilder<'a, T> {
        ReportWeatherBuilder {
            client: self.client,
            request: ReportWeatherRequest {
                key: serial.into(),
                date: date.into(),
                ..Default::default()
            },
        }
    }
}

/// Empty dates are treated as not given.
pub(crate) fn non_empty(date: impl Into<String>) -> Option<String> {
    Some(date.into()).filter(|d| !d.is_empty())
}

/// Request builder for `schedules.json` and `moistures.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct ZoneHistoryBuilder<'a, T> {
    client: &'a NetroClient<T>,
    endpoint: &'static str,
    query: ZoneHistoryQuery,
}

impl<'a, T: HttpTransport> ZoneHistoryBuilder<'a, T> {
    fn new(client: &'a NetroClient<T>, endpoint: &'static str, serial: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            query: ZoneHistoryQuery {
                key: serial.into(),
                ..Default::default()
            },
        }
    }

    /// First day to include, `YYYY-MM-DD`.
    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.query.start_date = non_empty(date);
        self
    }

    /// Last day to include, `YYYY-MM-DD`.
    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.query.end_date = non_empty(date);
        self
    }

    /// Restricts the result to these zone indices.
    pub fn zones(mut self, zones: impl IntoIterator<Item = u32>) -> Self {
        self.query.zones = Some(zones.into_iter().collect());
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.get(self.endpoint, &self.query).await
    }
}

/// Request builder for `events.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct EventsBuilder<'a, T> {
    client: &'a NetroClient<T>,
    query: EventsQuery,
}

impl<'a, T: HttpTransport> EventsBuilder<'a, T> {
    /// Only returns events of this type.
    pub fn event(mut self, event: u32) -> Self {
        self.query.event = Some(event);
        self
    }

    pub fn start_date(mut self, date: impl Into<String>) -> Self {
        self.query.start_date = non_empty(date);
        self
    }

    pub fn end_date(mut self, date: impl Into<String>) -> Self {
        self.query.end_date = non_empty(date);
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.get("events.json", &self.query).await
    }
}

/// Request builder for `set_status.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct SetStatusBuilder<'a, T> {
    client: &'a NetroClient<T>,
    request: SetStatusRequest,
}

impl<'a, T: HttpTransport> SetStatusBuilder<'a, T> {
    /// `true` enables the device, `false` puts it on standby.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.request.status = Some(u8::from(enabled));
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.post("set_status.json", &self.request).await
    }
}

/// Request builder for `water.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct WaterBuilder<'a, T> {
    client: &'a NetroClient<T>,
    request: WaterRequest,
}

impl<'a, T: HttpTransport> WaterBuilder<'a, T> {
    /// Zone indices to water.
    pub fn zones(mut self, zones: impl IntoIterator<Item = u32>) -> Self {
        self.request.zones = Some(zones.into_iter().collect());
        self
    }

    /// Minutes to wait before watering starts.
    pub fn delay_minutes(mut self, delay: u32) -> Self {
        self.request.delay = Some(delay);
        self
    }

    /// Start time in UTC, formatted `YYYY-MM-DD HH:MM`.
    pub fn start_time(mut self, start_time: impl Into<String>) -> Self {
        self.request.start_time = Some(start_time.into());
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.post("water.json", &self.request).await
    }
}

/// Request builder for `no_water.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct NoWaterBuilder<'a, T> {
    client: &'a NetroClient<T>,
    request: NoWaterRequest,
}

impl<'a, T: HttpTransport> NoWaterBuilder<'a, T> {
    pub fn days(mut self, days: u32) -> Self {
        self.request.days = days;
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.post("no_water.json", &self.request).await
    }
}

/// Request builder for `set_moisture.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct SetMoistureBuilder<'a, T> {
    client: &'a NetroClient<T>,
    request: SetMoistureRequest,
}

impl<'a, T: HttpTransport> SetMoistureBuilder<'a, T> {
    /// Zone indices the reading applies to.
    pub fn zones(mut self, zones: impl IntoIterator<Item = u32>) -> Self {
        self.request.zones = Some(zones.into_iter().collect());
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.post("set_moisture.json", &self.request).await
    }
}

/// Request builder for `report_weather.json`.
#[must_use = "requests do nothing until `send` is awaited"]
pub struct ReportWeatherBuilder<'a, T> {
    client: &'a NetroClient<T>,
    request: ReportWeatherRequest,
}

impl<'a, T: HttpTransport> ReportWeatherBuilder<'a, T> {
    /// Weather condition code as defined by Netro.
    pub fn condition(mut self, condition: i32) -> Self {
        self.request.condition = Some(condition);
        self
    }

    /// Rainfall in millimeters.
    pub fn rain(mut self, rain: f64) -> Self {
        self.request.rain = Some(rain);
        self
    }

    /// Rain probability, in percent.
    pub fn rain_prob(mut self, rain_prob: u32) -> Self {
        self.request.rain_prob = Some(rain_prob);
        self
    }

    /// Temperature in Celsius.
    pub fn temp(mut self, temp: f64) -> Self {
        self.request.temp = Some(temp);
        self
    }

    pub async fn send(self) -> NetroResult<Envelope> {
        self.client.post("report_weather.json", &self.request).await
    }
}
