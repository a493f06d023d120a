//! Export of the results view to a document on disk.
//!
//! An export renders a [`ResultsView`] snapshot through a
//! [`DocumentRenderer`] and writes the bytes to
//! `<output_dir>/<file_stem>.<extension>`. It never touches calculator
//! state. While it runs, the shared "exporting" flag is held by an
//! [`ExportGuard`], which clears it on success, on failure and when the
//! export future is dropped before completion.

mod html;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::ExportConfig;
use crate::logging::log_task_error;
use crate::views::ResultsView;

pub use html::HtmlRenderer;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    InProgress,

    #[error("{renderer} renderer failed: {reason}")]
    Render {
        renderer: &'static str,
        reason: String,
    },

    #[error("cannot write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageSize {
    A4,
}

impl PageSize {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::A4 => "A4",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn as_css(&self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

/// Page and file settings for an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub output_dir: PathBuf,
    pub file_stem: String,
    pub page_size: PageSize,
    pub orientation: Orientation,
    pub margin_mm: u32,
    /// Page background as `#rrggbb`; preserved in print.
    pub background: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&ExportConfig::default())
    }
}

impl ExportOptions {
    /// A4 portrait with no margin, named and coloured per `config`.
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            file_stem: config.file_stem.clone(),
            page_size: PageSize::A4,
            orientation: Orientation::Portrait,
            margin_mm: 0,
            background: config.background.clone(),
        }
    }

    /// Deterministic output path for a renderer's file extension.
    pub fn output_path(
        &self,
        extension: &str,
    ) -> PathBuf {
        self.output_dir
            .join(format!("{}.{extension}", self.file_stem))
    }
}

/// Turns a results view into document bytes.
///
/// One implementation per output format. The bundled [`HtmlRenderer`]
/// produces a self-contained page with a print stylesheet.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// Short lowercase identifier, used in logs and errors.
    fn name(&self) -> &'static str;

    /// File extension without the dot.
    fn extension(&self) -> &'static str;

    async fn render(
        &self,
        view: &ResultsView,
        options: &ExportOptions,
    ) -> Result<Vec<u8>, ExportError>;
}

/// Holds the exporting flag raised for as long as it lives.
#[derive(Debug)]
pub struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    /// Raises `flag`, or fails if another export already holds it.
    pub fn acquire(flag: Arc<AtomicBool>) -> Result<Self, ExportError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ExportError::InProgress)?;
        debug!("exporting flag raised");
        Ok(Self { flag })
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
        debug!("exporting flag cleared");
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> ExportError + '_ {
    move |source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Renders `view` and writes it to disk, returning the written path.
pub async fn export_view(
    renderer: &dyn DocumentRenderer,
    view: &ResultsView,
    options: &ExportOptions,
    exporting: Arc<AtomicBool>,
) -> Result<PathBuf, ExportError> {
    let _guard = ExportGuard::acquire(exporting)?;
    let path = options.output_path(renderer.extension());
    debug!(renderer = renderer.name(), path = %path.display(), "export started");

    let bytes = renderer.render(view, options).await?;
    tokio::fs::create_dir_all(&options.output_dir)
        .await
        .map_err(io_error(&options.output_dir))?;
    tokio::fs::write(&path, &bytes)
        .await
        .map_err(io_error(&path))?;

    info!(path = %path.display(), bytes = bytes.len(), "export written");
    Ok(path)
}

/// Runs [`export_view`] and logs a failure instead of returning it.
pub async fn export_and_log(
    renderer: &dyn DocumentRenderer,
    view: &ResultsView,
    options: &ExportOptions,
    exporting: Arc<AtomicBool>,
) -> Option<PathBuf> {
    log_task_error("export", export_view(renderer, view, options, exporting).await)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use pretty_assertions::assert_eq;
    use roi_core::CalculatorInputs;
    use roi_core::calculations::CommissionWorksheet;

    struct FailingRenderer;

    #[async_trait]
    impl DocumentRenderer for FailingRenderer {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn extension(&self) -> &'static str {
            "bin"
        }

        async fn render(
            &self,
            _view: &ResultsView,
            _options: &ExportOptions,
        ) -> Result<Vec<u8>, ExportError> {
            Err(ExportError::Render {
                renderer: "failing",
                reason: "boom".to_string(),
            })
        }
    }

    /// Never finishes; used to drop an export mid-flight.
    struct StalledRenderer;

    #[async_trait]
    impl DocumentRenderer for StalledRenderer {
        fn name(&self) -> &'static str {
            "stalled"
        }

        fn extension(&self) -> &'static str {
            "bin"
        }

        async fn render(
            &self,
            _view: &ResultsView,
            _options: &ExportOptions,
        ) -> Result<Vec<u8>, ExportError> {
            std::future::pending().await
        }
    }

    fn default_view() -> ResultsView {
        let inputs = CalculatorInputs::default();
        ResultsView::capture(&inputs, &CommissionWorksheet::default().calculate(&inputs))
    }

    #[test]
    fn output_path_uses_stem_and_extension() {
        let options = ExportOptions {
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };

        assert_eq!(
            options.output_path("html"),
            PathBuf::from("out").join("ESI-Channel-ROI-Calculator.html")
        );
    }

    #[test]
    fn default_options_are_a4_portrait_without_margin() {
        let options = ExportOptions::default();

        assert_eq!(options.page_size, PageSize::A4);
        assert_eq!(options.orientation, Orientation::Portrait);
        assert_eq!(options.margin_mm, 0);
        assert_eq!(options.background, "#252a2f");
    }

    #[test]
    fn guard_clears_flag_on_drop() {
        let flag = Arc::new(AtomicBool::new(false));

        let guard = ExportGuard::acquire(Arc::clone(&flag)).unwrap();
        assert!(flag.load(Ordering::SeqCst));

        drop(guard);
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[test]
    fn second_guard_is_refused() {
        let flag = Arc::new(AtomicBool::new(false));
        let _first = ExportGuard::acquire(Arc::clone(&flag)).unwrap();

        let second = ExportGuard::acquire(Arc::clone(&flag));

        assert!(matches!(second, Err(ExportError::InProgress)));
        assert!(flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn failed_render_clears_flag() {
        let flag = Arc::new(AtomicBool::new(false));

        let result = export_view(
            &FailingRenderer,
            &default_view(),
            &ExportOptions::default(),
            Arc::clone(&flag),
        )
        .await;

        assert!(matches!(result, Err(ExportError::Render { .. })));
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn dropped_export_clears_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let view = default_view();
        let options = ExportOptions::default();

        let outcome = tokio::time::timeout(
            Duration::from_millis(20),
            export_view(&StalledRenderer, &view, &options, Arc::clone(&flag)),
        )
        .await;

        assert!(outcome.is_err());
        assert!(!flag.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn export_and_log_swallows_failure() {
        let flag = Arc::new(AtomicBool::new(false));

        let path = export_and_log(
            &FailingRenderer,
            &default_view(),
            &ExportOptions::default(),
            Arc::clone(&flag),
        )
        .await;

        assert_eq!(path, None);
        assert!(!flag.load(Ordering::SeqCst));
    }
}
