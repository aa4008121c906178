//! Chromium-backed rendering service (chromiumoxide over CDP).

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetDeviceMetricsOverrideParams, SetUserAgentOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::network::{
    EventRequestWillBeSent, EventResponseReceived, LoaderId, ResourceType, Response,
};
use chromiumoxide::cdp::browser_protocol::page::{
    CaptureScreenshotFormat, EventDomContentEventFired, EventLoadEventFired, NavigateParams,
    PrintToPdfParams,
};
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::stream::BoxStream;
use futures::{FutureExt, StreamExt};
use tokio::task::JoinHandle;

use super::service::{
    BrowsingContext, Navigation, PageSnapshot, RedirectHop, RenderingService, ResponseEvent,
    Viewport, WaitStrategy,
};
use crate::config::NAVIGATION_TIMEOUT;
use crate::error_handling::{InitializationError, RenderError};
use crate::http::Headers;

// A4 in inches, 14mm/12mm margins.
const A4_WIDTH_IN: f64 = 8.27;
const A4_HEIGHT_IN: f64 = 11.69;
const PDF_MARGIN_VERTICAL_IN: f64 = 0.55;
const PDF_MARGIN_HORIZONTAL_IN: f64 = 0.47;

/// Headless Chromium process plus its CDP event loop.
pub struct ChromiumRenderingService {
    browser: Browser,
    handler: JoinHandle<()>,
}

impl ChromiumRenderingService {
    /// Launches headless Chromium.
    ///
    /// Uses `chrome_executable` when given, otherwise chromiumoxide's own
    /// detection (PATH and the usual install locations).
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::BrowserError` if the config is invalid or
    /// the process cannot be started.
    pub async fn launch(chrome_executable: Option<&Path>) -> Result<Self, InitializationError> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .viewport(None)
            .request_timeout(NAVIGATION_TIMEOUT)
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .arg("--hide-scrollbars");
        if let Some(path) = chrome_executable {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| InitializationError::BrowserError(format!("invalid browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| InitializationError::BrowserError(format!("failed to launch Chromium: {e}")))?;

        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    log::debug!("CDP handler error: {}", e);
                }
            }
        });

        log::info!("Headless Chromium started");
        Ok(Self { browser, handler })
    }
}

impl Drop for ChromiumRenderingService {
    fn drop(&mut self) {
        self.handler.abort();
    }
}

#[async_trait]
impl RenderingService for ChromiumRenderingService {
    async fn new_context(
        &self,
        viewport: Viewport,
        user_agent: Option<&str>,
    ) -> Result<Box<dyn BrowsingContext>, RenderError> {
        let page = self
            .browser
            .new_page("about:blank")
            .await
            .map_err(|e| RenderError::Browser(format!("failed to open page: {e}")))?;

        let metrics = SetDeviceMetricsOverrideParams::new(
            i64::from(viewport.width),
            i64::from(viewport.height),
            if viewport.mobile { 3.0 } else { 1.0 },
            viewport.mobile,
        );
        let configured = match page.execute(metrics).await {
            Ok(_) => match user_agent {
                Some(ua) => page
                    .execute(SetUserAgentOverrideParams::new(ua))
                    .await
                    .map(|_| ()),
                None => Ok(()),
            },
            Err(e) => Err(e),
        };
        if let Err(e) = configured {
            let _ = page.close().await;
            return Err(RenderError::Browser(format!("failed to configure page: {e}")));
        }

        Ok(Box::new(ChromiumContext { page }))
    }
}

/// One Chromium tab.
pub struct ChromiumContext {
    page: Page,
}

fn page_error(operation: &'static str, e: impl std::fmt::Display) -> RenderError {
    RenderError::PageOperation {
        operation,
        reason: e.to_string(),
    }
}

fn resource_type_name(ty: &ResourceType) -> String {
    format!("{ty:?}").to_lowercase()
}

fn response_headers(response: &Response) -> Headers {
    response
        .headers
        .inner()
        .as_object()
        .map(|map| {
            map.iter()
                .map(|(k, v)| {
                    let value = v
                        .as_str()
                        .map(str::to_string)
                        .unwrap_or_else(|| v.to_string());
                    (k.to_ascii_lowercase(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

fn status_of(response: &Response) -> u16 {
    u16::try_from(response.status).unwrap_or(0)
}

#[async_trait]
impl BrowsingContext for ChromiumContext {
    async fn listen_responses(&mut self) -> Result<BoxStream<'static, ResponseEvent>, RenderError> {
        let stream = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| page_error("listen_responses", e))?;

        Ok(stream
            .map(|event| ResponseEvent {
                url: event.response.url.clone(),
                status: status_of(&event.response),
                resource_type: resource_type_name(&event.r#type),
                headers: response_headers(&event.response),
                from_service_worker: event.response.from_service_worker.unwrap_or(false),
            })
            .boxed())
    }

    async fn navigate(
        &mut self,
        url: &str,
        wait: WaitStrategy,
        timeout: Duration,
    ) -> Result<Navigation, RenderError> {
        let mut requests = self
            .page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(|e| page_error("navigate", e))?;
        let mut responses = self
            .page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| page_error("navigate", e))?;
        let mut settled = match wait {
            WaitStrategy::ContentLoaded => self
                .page
                .event_listener::<EventDomContentEventFired>()
                .await
                .map_err(|e| page_error("navigate", e))?
                .map(|_| ())
                .boxed(),
            WaitStrategy::FullyLoaded => self
                .page
                .event_listener::<EventLoadEventFired>()
                .await
                .map_err(|e| page_error("navigate", e))?
                .map(|_| ())
                .boxed(),
        };

        let page = &self.page;
        let navigation = async {
            let result = page
                .execute(NavigateParams::new(url))
                .await
                .map_err(|e| RenderError::Navigation {
                    url: url.to_string(),
                    reason: e.to_string(),
                })?;
            if let Some(error_text) = result.result.error_text.clone() {
                return Err(RenderError::Navigation {
                    url: url.to_string(),
                    reason: error_text,
                });
            }
            settled.next().await;
            Ok(result.result.loader_id.clone())
        };

        let loader_id = tokio::time::timeout(timeout, navigation)
            .await
            .map_err(|_| RenderError::Timeout {
                url: url.to_string(),
                after: timeout,
            })??;

        let is_main_document =
            |event_loader: &LoaderId| loader_id.as_ref().map_or(true, |id| id == event_loader);

        let mut redirect_chain = Vec::new();
        let mut last_request: Option<(String, String)> = None;
        while let Some(Some(event)) = requests.next().now_or_never() {
            if event.r#type != Some(ResourceType::Document) || !is_main_document(&event.loader_id) {
                continue;
            }
            if let Some(redirect) = &event.redirect_response {
                redirect_chain.push(RedirectHop {
                    url: redirect.url.clone(),
                    method: last_request
                        .as_ref()
                        .map(|(_, method)| method.clone())
                        .unwrap_or_else(|| "GET".to_string()),
                    status: Some(status_of(redirect)),
                });
            }
            last_request = Some((event.request.url.clone(), event.request.method.clone()));
        }

        let mut main_response: Option<Response> = None;
        while let Some(Some(event)) = responses.next().now_or_never() {
            if event.r#type == ResourceType::Document && is_main_document(&event.loader_id) {
                main_response = Some(event.response.clone());
            }
        }

        let status = main_response.as_ref().map(status_of);
        let headers = main_response.as_ref().map(response_headers).unwrap_or_default();
        if let Some((request_url, method)) = last_request {
            redirect_chain.push(RedirectHop {
                url: request_url,
                method,
                status,
            });
        }

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .or_else(|| main_response.as_ref().map(|r| r.url.clone()))
            .unwrap_or_else(|| url.to_string());

        Ok(Navigation {
            final_url,
            status,
            headers,
            redirect_chain,
        })
    }

    async fn snapshot(&self) -> Result<PageSnapshot, RenderError> {
        let final_url = self
            .page
            .url()
            .await
            .map_err(|e| page_error("snapshot", e))?
            .unwrap_or_default();
        let html = self
            .page
            .content()
            .await
            .map_err(|e| page_error("snapshot", e))?;
        let title = self
            .page
            .get_title()
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        Ok(PageSnapshot {
            final_url,
            html,
            title,
        })
    }

    async fn evaluate(&self, script: &str) -> Result<serde_json::Value, RenderError> {
        self.page
            .evaluate(script)
            .await
            .map_err(|e| page_error("evaluate", e))?
            .into_value::<serde_json::Value>()
            .map_err(|e| page_error("evaluate", e))
    }

    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>, RenderError> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .full_page(full_page)
            .build();
        self.page
            .screenshot(params)
            .await
            .map_err(|e| page_error("screenshot", e))
    }

    async fn print_pdf(&self) -> Result<Vec<u8>, RenderError> {
        let params = PrintToPdfParams::builder()
            .print_background(true)
            .paper_width(A4_WIDTH_IN)
            .paper_height(A4_HEIGHT_IN)
            .margin_top(PDF_MARGIN_VERTICAL_IN)
            .margin_bottom(PDF_MARGIN_VERTICAL_IN)
            .margin_left(PDF_MARGIN_HORIZONTAL_IN)
            .margin_right(PDF_MARGIN_HORIZONTAL_IN)
            .build();
        self.page
            .pdf(params)
            .await
            .map_err(|e| page_error("print_pdf", e))
    }

    async fn close(self: Box<Self>) {
        if let Err(e) = self.page.close().await {
            log::debug!("Failed to close browsing context: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_type_name_lowercase() {
        assert_eq!(resource_type_name(&ResourceType::Document), "document");
        assert_eq!(resource_type_name(&ResourceType::Stylesheet), "stylesheet");
    }

    #[tokio::test]
    #[ignore] // Requires Chromium to be installed
    async fn test_chromium_navigate_and_snapshot() {
        let service = ChromiumRenderingService::launch(None)
            .await
            .expect("failed to launch Chromium");
        let mut ctx = service
            .new_context(Viewport::desktop(), None)
            .await
            .expect("failed to create context");

        ctx.navigate(
            "data:text/html,<title>Hello</title><h1>Hello</h1>",
            WaitStrategy::FullyLoaded,
            Duration::from_secs(10),
        )
        .await
        .expect("navigation failed");

        let snapshot = ctx.snapshot().await.expect("snapshot failed");
        assert_eq!(snapshot.title, "Hello");
        assert!(snapshot.html.contains("<h1>Hello</h1>"));

        let png = ctx.screenshot(false).await.expect("screenshot failed");
        assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
        ctx.close().await;
    }
}
