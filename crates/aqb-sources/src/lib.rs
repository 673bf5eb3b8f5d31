//! HTTP adapter for the upstream air quality APIs.
//!
//! Implements the `aqb-core` [`AirQualitySource`] port over WAQI (Jakarta
//! stations) and data.gov.sg (Singapore PSI). No retries: one failed attempt
//! makes the source unavailable for the current request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use aqb_core::{
    config::Config,
    errors::Error,
    model::{RegionalPsiReading, StationReading},
    ports::AirQualitySource,
    Result,
};

pub mod data_gov_sg;
pub mod waqi;

/// Endpoints and credentials for [`HttpAirQualitySource`].
#[derive(Clone, Debug)]
pub struct SourceConfig {
    pub aqicn_base_url: String,
    pub aqicn_token: String,
    pub sg_psi_url: String,
    pub timeout: Duration,
}

impl SourceConfig {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            aqicn_base_url: cfg.aqicn_base_url.clone(),
            aqicn_token: cfg.aqicn_api_token.clone(),
            sg_psi_url: cfg.sg_psi_url.clone(),
            timeout: cfg.http_timeout,
        }
    }
}

#[derive(Clone, Debug)]
pub struct HttpAirQualitySource {
    cfg: SourceConfig,
    http: reqwest::Client,
}

impl HttpAirQualitySource {
    pub fn new(cfg: SourceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(cfg.timeout)
            .build()
            .map_err(|e| Error::Http(format!("reqwest client build: {e}")))?;
        Ok(Self { cfg, http })
    }

    /// Sequential per-station fetch, preserving input order.
    ///
    /// Stations answering with a non-success status or a non-`ok` payload are
    /// skipped. A transport error or an undecodable body fails the whole call.
    pub async fn try_fetch_city_stations(
        &self,
        station_ids: &[String],
    ) -> Result<Vec<StationReading>> {
        let base = self.cfg.aqicn_base_url.trim_end_matches('/');
        let mut out = Vec::with_capacity(station_ids.len());

        for station in station_ids {
            let resp = self
                .http
                .get(format!("{base}/feed/{station}/"))
                .query(&[("token", self.cfg.aqicn_token.as_str())])
                .send()
                .await
                .map_err(http_err)?;

            let status = resp.status();
            if !status.is_success() {
                tracing::debug!(%station, %status, "station dropped: http status");
                continue;
            }

            let body = resp.text().await.map_err(http_err)?;
            match waqi::parse_station_feed(station, &body)? {
                Some(reading) => out.push(reading),
                None => tracing::debug!(%station, "station dropped: upstream status not ok"),
            }
        }

        Ok(out)
    }

    pub async fn try_fetch_regional_index(&self) -> Result<RegionalPsiReading> {
        let resp = self
            .http
            .get(&self.cfg.sg_psi_url)
            .send()
            .await
            .map_err(http_err)?;

        if resp.status() != StatusCode::OK {
            return Err(Error::Upstream {
                source_name: data_gov_sg::SOURCE_NAME,
                reason: format!("http status {}", resp.status()),
            });
        }

        let body = resp.text().await.map_err(http_err)?;
        data_gov_sg::parse_psi_response(&body)
    }
}

/// The request URL carries the API token; keep it out of error text.
fn http_err(e: reqwest::Error) -> Error {
    Error::Http(e.without_url().to_string())
}

#[async_trait]
impl AirQualitySource for HttpAirQualitySource {
    async fn fetch_city_stations(&self, station_ids: &[String]) -> Option<Vec<StationReading>> {
        match self.try_fetch_city_stations(station_ids).await {
            Ok(readings) => {
                tracing::info!(
                    requested = station_ids.len(),
                    received = readings.len(),
                    "fetched Jakarta stations"
                );
                Some(readings)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Jakarta AQI source unavailable");
                None
            }
        }
    }

    async fn fetch_regional_index(&self) -> Option<RegionalPsiReading> {
        match self.try_fetch_regional_index().await {
            Ok(reading) => {
                tracing::info!(observed_at = %reading.observed_at, "fetched Singapore PSI");
                Some(reading)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Singapore PSI source unavailable");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::{TcpListener, TcpStream},
        thread,
    };

    use super::*;

    /// Minimal HTTP/1.1 responder: `(path prefix, status, body)` routes,
    /// 404 for anything else.
    fn serve(routes: Vec<(&'static str, u16, &'static str)>) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(stream) = stream else { continue };
                respond(stream, &routes);
            }
        });
        format!("http://{addr}")
    }

    fn respond(mut stream: TcpStream, routes: &[(&'static str, u16, &'static str)]) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
            match stream.read(&mut chunk) {
                Ok(0) | Err(_) => return,
                Ok(n) => buf.extend_from_slice(&chunk[..n]),
            }
        }
        let head = String::from_utf8_lossy(&buf);
        let path = head.split_whitespace().nth(1).unwrap_or("/").to_string();

        let (status, body) = routes
            .iter()
            .find(|(prefix, _, _)| path.starts_with(prefix))
            .map(|(_, s, b)| (*s, *b))
            .unwrap_or((404, ""));
        let resp = format!(
            "HTTP/1.1 {status} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let _ = stream.write_all(resp.as_bytes());
    }

    fn source(base: &str, psi_url: &str, timeout: Duration) -> HttpAirQualitySource {
        HttpAirQualitySource::new(SourceConfig {
            aqicn_base_url: base.to_string(),
            aqicn_token: "secret-token".to_string(),
            sg_psi_url: psi_url.to_string(),
            timeout,
        })
        .unwrap()
    }

    fn ids(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn keeps_only_ok_stations_in_input_order() {
        let base = serve(vec![
            (
                "/feed/jakarta-utara/?token=secret-token",
                200,
                r#"{"status":"ok","data":{"aqi":60,"iaqi":{}}}"#,
            ),
            (
                "/feed/jakarta/?token=secret-token",
                200,
                r#"{"status":"ok","data":{"aqi":40,"iaqi":{"pm25":{"v":40}}}}"#,
            ),
            (
                "/feed/jakarta-barat/",
                200,
                r#"{"status":"error","data":"Unknown station"}"#,
            ),
            ("/feed/jakarta-timur/", 500, "oops"),
        ]);
        let src = source(&base, &format!("{base}/psi"), Duration::from_secs(5));

        let got = src
            .fetch_city_stations(&ids(&[
                "jakarta-utara",
                "jakarta-barat",
                "jakarta-timur",
                "jakarta",
            ]))
            .await
            .unwrap();
        let order: Vec<(&str, Option<u32>)> = got
            .iter()
            .map(|r| (r.station_id.as_str(), r.aqi))
            .collect();
        assert_eq!(order, vec![("jakarta-utara", Some(60)), ("jakarta", Some(40))]);
    }

    #[tokio::test]
    async fn undecodable_station_body_fails_the_source() {
        let base = serve(vec![
            ("/feed/jakarta/", 200, r#"{"status":"ok","data":{"aqi":40}}"#),
            ("/feed/jakarta-pusat/", 200, "<html>maintenance</html>"),
        ]);
        let src = source(&base, &format!("{base}/psi"), Duration::from_secs(5));
        assert!(src
            .fetch_city_stations(&ids(&["jakarta", "jakarta-pusat"]))
            .await
            .is_none());
    }

    #[tokio::test]
    async fn regional_index_requires_http_200() {
        let base = serve(vec![
            (
                "/ok",
                200,
                r#"{"items":[{"timestamp":"2025-03-14T09:00:00+08:00","readings":{"psi_twenty_four_hourly":{"national":57}}}]}"#,
            ),
            ("/busy", 503, r#"{"items":[]}"#),
            ("/empty", 200, r#"{"items":[]}"#),
        ]);

        let ok = source(&base, &format!("{base}/ok"), Duration::from_secs(5));
        assert_eq!(ok.fetch_regional_index().await.unwrap().psi.national, Some(57));

        let busy = source(&base, &format!("{base}/busy"), Duration::from_secs(5));
        assert!(busy.fetch_regional_index().await.is_none());

        let empty = source(&base, &format!("{base}/empty"), Duration::from_secs(5));
        assert!(empty.fetch_regional_index().await.is_none());
    }

    #[tokio::test]
    async fn timeout_yields_unavailable() {
        // Accepts connections (backlog) but never answers.
        let silent = TcpListener::bind("127.0.0.1:0").unwrap();
        let base = format!("http://{}", silent.local_addr().unwrap());
        let src = source(&base, &format!("{base}/psi"), Duration::from_millis(300));

        assert!(src.fetch_city_stations(&ids(&["jakarta"])).await.is_none());
        assert!(src.fetch_regional_index().await.is_none());

        let err = src.try_fetch_regional_index().await.unwrap_err();
        assert!(matches!(err, Error::Http(_)));
        drop(silent);
    }

    #[tokio::test]
    async fn connection_refused_is_contained() {
        let addr = {
            let l = TcpListener::bind("127.0.0.1:0").unwrap();
            l.local_addr().unwrap()
        };
        let base = format!("http://{addr}");
        let src = source(&base, &format!("{base}/psi"), Duration::from_secs(2));

        let err = src
            .try_fetch_city_stations(&ids(&["jakarta"]))
            .await
            .unwrap_err();
        assert!(!err.to_string().contains("secret-token"));
        assert!(src.fetch_city_stations(&ids(&["jakarta"])).await.is_none());
    }

    #[test]
    fn source_config_copies_upstream_settings() {
        let cfg = Config {
            telegram_bot_token: "t".to_string(),
            aqicn_api_token: "a".to_string(),
            aqicn_base_url: "http://w".to_string(),
            sg_psi_url: "http://p".to_string(),
            jakarta_stations: vec![],
            http_timeout: Duration::from_secs(4),
        };
        let sc = SourceConfig::from_config(&cfg);
        assert_eq!(sc.aqicn_token, "a");
        assert_eq!(sc.aqicn_base_url, "http://w");
        assert_eq!(sc.sg_psi_url, "http://p");
        assert_eq!(sc.timeout, Duration::from_secs(4));
    }
}
