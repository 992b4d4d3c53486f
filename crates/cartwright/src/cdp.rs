//! Live browser session over the Chrome DevTools Protocol.
//!
//! Compiled only with the `browser` feature. [`CdpSession`] implements
//! [`Session`] by evaluating small DOM expressions in the page, so the
//! whole automation surface rides on `evaluate` plus `goto`; nothing else
//! of the protocol is load-bearing. Queries are serialized into the
//! expressions as JSON string literals, never spliced raw.

use crate::result::{CartwrightError, CartwrightResult};
use crate::session::Session;
use async_trait::async_trait;
use chromiumoxide::browser::{Browser as CdpBrowser, BrowserConfig as CdpConfig};
use chromiumoxide::page::Page as CdpPage;
use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Browser launch options
#[derive(Debug, Clone)]
pub struct BrowserOptions {
    /// Run without a visible window
    pub headless: bool,
    /// Viewport width
    pub viewport_width: u32,
    /// Viewport height
    pub viewport_height: u32,
    /// Path to the chromium binary (`None` = auto-detect)
    pub chromium_path: Option<String>,
    /// Chromium sandbox (disable in containers)
    pub sandbox: bool,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            headless: true,
            viewport_width: 1280,
            viewport_height: 720,
            chromium_path: None,
            sandbox: true,
        }
    }
}

impl BrowserOptions {
    /// Set headless mode
    #[must_use]
    pub const fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set viewport dimensions
    #[must_use]
    pub const fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    /// Set the chromium binary path
    #[must_use]
    pub fn with_chromium_path(mut self, path: impl Into<String>) -> Self {
        self.chromium_path = Some(path.into());
        self
    }

    /// Disable the sandbox (containers/CI)
    #[must_use]
    pub const fn with_no_sandbox(mut self) -> Self {
        self.sandbox = false;
        self
    }
}

/// A launched browser that hands out page sessions
#[derive(Debug)]
pub struct Browser {
    inner: Arc<Mutex<CdpBrowser>>,
    handle: tokio::task::JoinHandle<()>,
}

impl Browser {
    /// Launch a browser with the given options
    pub async fn launch(options: BrowserOptions) -> CartwrightResult<Self> {
        let mut builder = CdpConfig::builder()
            .window_size(options.viewport_width, options.viewport_height);
        if !options.headless {
            builder = builder.with_head();
        }
        if !options.sandbox {
            builder = builder.no_sandbox();
        }
        if let Some(ref path) = options.chromium_path {
            builder = builder.chrome_executable(path);
        }
        let config = builder
            .build()
            .map_err(|e| CartwrightError::BrowserLaunchError { message: e })?;

        let (browser, mut handler) = CdpBrowser::launch(config).await.map_err(|e| {
            CartwrightError::BrowserLaunchError {
                message: e.to_string(),
            }
        })?;
        debug!("browser launched");

        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    warn!("browser handler stream ended with an error");
                    break;
                }
            }
        });

        Ok(Self {
            inner: Arc::new(Mutex::new(browser)),
            handle,
        })
    }

    /// Open a fresh page session
    pub async fn new_session(&self) -> CartwrightResult<CdpSession> {
        let browser = self.inner.lock().await;
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| CartwrightError::SessionError {
                message: e.to_string(),
            })?;
        Ok(CdpSession {
            page: Arc::new(Mutex::new(page)),
        })
    }

    /// Close the browser and stop the handler task
    pub async fn close(self) -> CartwrightResult<()> {
        {
            let mut browser = self.inner.lock().await;
            browser
                .close()
                .await
                .map_err(|e| CartwrightError::BrowserLaunchError {
                    message: e.to_string(),
                })?;
        }
        self.handle.abort();
        Ok(())
    }
}

/// A live page implementing the session contract
#[derive(Debug)]
pub struct CdpSession {
    page: Arc<Mutex<CdpPage>>,
}

impl CdpSession {
    /// Serialize a query string into a JS string literal
    fn literal(query: &str) -> CartwrightResult<String> {
        Ok(serde_json::to_string(query)?)
    }

    async fn eval<T: serde::de::DeserializeOwned>(&self, expr: &str) -> CartwrightResult<T> {
        let page = self.page.lock().await;
        let result = page
            .evaluate(expr)
            .await
            .map_err(|e| CartwrightError::SessionError {
                message: e.to_string(),
            })?;
        result
            .into_value()
            .map_err(|e| CartwrightError::SessionError {
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl Session for CdpSession {
    async fn goto(&self, url: &str) -> CartwrightResult<()> {
        let page = self.page.lock().await;
        page.goto(url)
            .await
            .map_err(|e| CartwrightError::NavigationError {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }

    async fn current_url(&self) -> CartwrightResult<String> {
        let url: Option<String> = self.eval("window.location.href").await?;
        url.ok_or_else(|| CartwrightError::SessionError {
            message: "page has no location".to_string(),
        })
    }

    async fn click(&self, query: &str) -> CartwrightResult<()> {
        let q = Self::literal(query)?;
        let clicked: bool = self
            .eval(&format!(
                "(() => {{ const el = document.querySelector({q}); \
                 if (!el) return false; el.click(); return true; }})()"
            ))
            .await?;
        if clicked {
            Ok(())
        } else {
            Err(CartwrightError::SessionError {
                message: format!("no element matches {query:?} to click"),
            })
        }
    }

    async fn fill(&self, query: &str, text: &str) -> CartwrightResult<()> {
        let q = Self::literal(query)?;
        let value = Self::literal(text)?;
        let filled: bool = self
            .eval(&format!(
                "(() => {{ const el = document.querySelector({q}); \
                 if (!el) return false; el.value = {value}; \
                 el.dispatchEvent(new Event('input', {{ bubbles: true }})); \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return true; }})()"
            ))
            .await?;
        if filled {
            Ok(())
        } else {
            Err(CartwrightError::SessionError {
                message: format!("no element matches {query:?} to fill"),
            })
        }
    }

    async fn select_value(&self, query: &str, value: &str) -> CartwrightResult<()> {
        let q = Self::literal(query)?;
        let v = Self::literal(value)?;
        let selected: bool = self
            .eval(&format!(
                "(() => {{ const el = document.querySelector({q}); \
                 if (!el) return false; el.value = {v}; \
                 el.dispatchEvent(new Event('change', {{ bubbles: true }})); \
                 return el.value === {v}; }})()"
            ))
            .await?;
        if selected {
            Ok(())
        } else {
            Err(CartwrightError::SessionError {
                message: format!("could not select {value:?} on {query:?}"),
            })
        }
    }

    async fn text(&self, query: &str) -> CartwrightResult<String> {
        let q = Self::literal(query)?;
        let text: Option<String> = self
            .eval(&format!(
                "(() => {{ const el = document.querySelector({q}); \
                 return el ? el.textContent : null; }})()"
            ))
            .await?;
        text.ok_or_else(|| CartwrightError::SessionError {
            message: format!("no element matches {query:?}"),
        })
    }

    async fn texts(&self, query: &str) -> CartwrightResult<Vec<String>> {
        let q = Self::literal(query)?;
        self.eval(&format!(
            "Array.from(document.querySelectorAll({q}), el => el.textContent)"
        ))
        .await
    }

    async fn count(&self, query: &str) -> CartwrightResult<usize> {
        let q = Self::literal(query)?;
        self.eval(&format!("document.querySelectorAll({q}).length"))
            .await
    }

    async fn is_displayed(&self, query: &str) -> CartwrightResult<bool> {
        let q = Self::literal(query)?;
        self.eval(&format!(
            "(() => {{ const el = document.querySelector({q}); \
             if (!el) return false; \
             const r = el.getBoundingClientRect(); \
             return r.width > 0 && r.height > 0; }})()"
        ))
        .await
    }

    async fn input_value(&self, query: &str) -> CartwrightResult<String> {
        let q = Self::literal(query)?;
        let value: Option<String> = self
            .eval(&format!(
                "(() => {{ const el = document.querySelector({q}); \
                 return el ? el.value : null; }})()"
            ))
            .await?;
        value.ok_or_else(|| CartwrightError::SessionError {
            message: format!("no element matches {query:?}"),
        })
    }
}
