//! Watch mode for automatic rebuilds on file changes
//!
//! Subscribes to the SASS include paths and the JS source directories and
//! rebuilds the matching asset kind for every create, modify or remove event.
//! Events are not debounced: each one triggers its own build, and builds run
//! one at a time on the watching thread.
//!
//! Build failures never leave the loop. They are written to the sink and the
//! watch keeps going; only an interrupt ends it.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::build::{AssetKind, BuildContext, BuildError, BuildOutputs, JsBuild, SassBuild};
use crate::output::OutputSink;

/// Error during watch mode
#[derive(Debug, Error)]
pub enum WatchError {
    /// Failed to initialize file watcher
    #[error("Failed to initialize file watcher: {0}")]
    WatcherInit(#[source] notify::Error),
    /// Failed to add watch path
    #[error("Failed to watch {}: {source}", .path.display())]
    WatchPath {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },
    /// None of the source directories exist
    #[error("No source directory to watch (tried {})", display_paths(.0))]
    NothingToWatch(Vec<PathBuf>),
    /// Event channel closed unexpectedly
    #[error("Watch channel closed")]
    ChannelClosed,
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths.iter().map(|p| p.display().to_string()).collect::<Vec<_>>().join(", ")
}

/// Watch lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Not subscribed
    Idle,
    /// Subscribed and handling events
    Watching,
}

/// Rebuilds one asset kind in response to file changes.
pub trait ChangeHandler {
    /// The kind this handler rebuilds.
    fn kind(&self) -> AssetKind;

    fn context(&self) -> &BuildContext;

    /// Run the build.
    fn rebuild(&self, sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError>;

    /// Directories to subscribe to, recursively.
    fn roots(&self) -> Vec<PathBuf> {
        self.context().source_roots(self.kind())
    }

    /// Whether a change to `path` should trigger this handler.
    fn is_relevant(&self, path: &Path) -> bool {
        is_relevant(self.context(), self.kind(), path)
    }
}

impl ChangeHandler for SassBuild<'_> {
    fn kind(&self) -> AssetKind {
        AssetKind::Sass
    }

    fn context(&self) -> &BuildContext {
        SassBuild::context(self)
    }

    fn rebuild(&self, sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
        self.run(sink)
    }
}

impl ChangeHandler for JsBuild<'_> {
    fn kind(&self) -> AssetKind {
        AssetKind::Js
    }

    fn context(&self) -> &BuildContext {
        JsBuild::context(self)
    }

    fn rebuild(&self, sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
        self.run(sink)
    }
}

/// Check whether `path` belongs to `kind`: under one of its source roots,
/// matching one of its file-name patterns, and not a build artifact.
pub fn is_relevant(context: &BuildContext, kind: AssetKind, path: &Path) -> bool {
    if !context.source_roots(kind).iter().any(|root| is_under(path, root)) {
        return false;
    }

    let is_artifact = AssetKind::ALL
        .iter()
        .any(|k| context.outputs(*k).paths().iter().any(|out| same_path(path, out)));
    if is_artifact {
        return false;
    }

    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    context
        .watch_patterns(kind)
        .iter()
        .filter_map(|p| glob::Pattern::new(p).ok())
        .any(|p| p.matches(name))
}

fn is_under(path: &Path, root: &Path) -> bool {
    path.starts_with(root) || root.canonicalize().map(|r| path.starts_with(r)).unwrap_or(false)
}

fn same_path(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    // Notifications may carry canonical paths; compare through the parent
    // since removed files cannot be canonicalized.
    match (a.parent(), b.parent(), a.file_name(), b.file_name()) {
        (Some(pa), Some(pb), Some(na), Some(nb)) if na == nb => {
            matches!((pa.canonicalize(), pb.canonicalize()), (Ok(x), Ok(y)) if x == y)
        }
        _ => false,
    }
}

/// Whether an event kind reports a content change.
fn is_change(kind: &EventKind) -> bool {
    matches!(kind, EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_))
}

/// Messages delivered to the watch loop.
#[derive(Debug)]
pub enum WatchMessage {
    /// A filesystem notification
    Fs(notify::Result<Event>),
    /// Stop watching
    Interrupt,
}

/// Handle for stopping a running watch from another thread.
///
/// The flag is seen before any event still queued behind the interrupt.
#[derive(Debug, Clone)]
pub struct Interrupter {
    tx: Sender<WatchMessage>,
    interrupted: Arc<AtomicBool>,
}

impl Interrupter {
    /// Ask the watch loop to stop after the current build.
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        let _ = self.tx.send(WatchMessage::Interrupt);
    }
}

/// Watches source trees and dispatches rebuilds.
///
/// # Example
/// ```ignore
/// let mut watch = Watch::for_context(&context)?;
/// let interrupter = watch.interrupter();
/// ctrlc::set_handler(move || interrupter.interrupt())?;
/// watch.run(&ConsoleSink::new())?;
/// ```
pub struct Watch<'a> {
    handlers: Vec<Box<dyn ChangeHandler + 'a>>,
    state: WatchState,
    watcher: Option<RecommendedWatcher>,
    tx: Sender<WatchMessage>,
    rx: Receiver<WatchMessage>,
    interrupted: Arc<AtomicBool>,
}

impl<'a> Watch<'a> {
    /// Create a watch with no handlers.
    pub fn new() -> Self {
        let (tx, rx) = channel();
        Self {
            handlers: vec![],
            state: WatchState::Idle,
            watcher: None,
            tx,
            rx,
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Watch both asset kinds of `context` with their configured tools.
    pub fn for_context(context: &'a BuildContext) -> Result<Self, BuildError> {
        let mut watch = Self::new();
        watch.add_handler(Box::new(SassBuild::from_context(context)?));
        watch.add_handler(Box::new(JsBuild::from_context(context)?));
        Ok(watch)
    }

    pub fn add_handler(&mut self, handler: Box<dyn ChangeHandler + 'a>) {
        self.handlers.push(handler);
    }

    pub fn with_handler(mut self, handler: Box<dyn ChangeHandler + 'a>) -> Self {
        self.add_handler(handler);
        self
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    pub fn interrupter(&self) -> Interrupter {
        Interrupter { tx: self.tx.clone(), interrupted: Arc::clone(&self.interrupted) }
    }

    /// Subscribe to every existing handler root (`Idle -> Watching`).
    ///
    /// Missing roots are reported and skipped; it is an error only when none
    /// exist.
    pub fn start(&mut self, sink: &dyn OutputSink) -> Result<(), WatchError> {
        if self.state == WatchState::Watching {
            return Ok(());
        }

        let tx = self.tx.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let _ = tx.send(WatchMessage::Fs(res));
        })
        .map_err(WatchError::WatcherInit)?;

        let mut roots: Vec<PathBuf> = vec![];
        for root in self.handlers.iter().flat_map(|h| h.roots()) {
            if !roots.contains(&root) {
                roots.push(root);
            }
        }

        let mut watched = 0;
        for root in &roots {
            if !root.is_dir() {
                sink.line(&format!("[{}] Skipping missing {}", timestamp(), root.display()));
                continue;
            }
            watcher
                .watch(root, RecursiveMode::Recursive)
                .map_err(|source| WatchError::WatchPath { path: root.clone(), source })?;
            sink.line(&format!("[{}] Watching {}", timestamp(), root.display()));
            watched += 1;
        }
        if watched == 0 {
            return Err(WatchError::NothingToWatch(roots));
        }

        self.watcher = Some(watcher);
        self.state = WatchState::Watching;
        Ok(())
    }

    /// Release the subscriptions (`Watching -> Idle`).
    pub fn stop(&mut self) {
        self.watcher = None;
        self.state = WatchState::Idle;
    }

    /// Rebuild every kind the event touches, once each.
    ///
    /// Returns the kinds that were rebuilt, whether or not the build
    /// succeeded.
    pub fn handle_event(&self, event: &Event, sink: &dyn OutputSink) -> Vec<AssetKind> {
        if !is_change(&event.kind) {
            return vec![];
        }

        let mut triggered = vec![];
        for handler in &self.handlers {
            if let Some(path) = event.paths.iter().find(|p| handler.is_relevant(p)) {
                sink.line(&format!("[{}] Changed: {}", timestamp(), path.display()));
                rebuild(handler.as_ref(), sink);
                triggered.push(handler.kind());
            }
        }
        triggered
    }

    /// Watch until interrupted.
    ///
    /// Blocks the calling thread. An interrupt lets the build in progress
    /// finish; events queued behind it are dropped. Returns `Ok` after an
    /// interrupt; setup failures are the only errors.
    pub fn run(&mut self, sink: &dyn OutputSink) -> Result<(), WatchError> {
        self.start(sink)?;

        let result = loop {
            if self.interrupted.load(Ordering::SeqCst) {
                break Ok(());
            }
            match self.rx.recv() {
                Ok(WatchMessage::Fs(Ok(event))) => {
                    self.handle_event(&event, sink);
                }
                Ok(WatchMessage::Fs(Err(error))) => {
                    // Watch error (non-fatal) - log but continue watching
                    sink.line(&format!("[{}] Watch error: {}", timestamp(), error));
                }
                Ok(WatchMessage::Interrupt) => break Ok(()),
                Err(_) => break Err(WatchError::ChannelClosed),
            }
        };

        self.stop();
        self.interrupted.store(false, Ordering::SeqCst);
        while self.rx.try_recv().is_ok() {}
        sink.line(&format!("[{}] Stopped watching", timestamp()));
        result
    }
}

impl Default for Watch<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one triggered build, containing any failure.
fn rebuild(handler: &dyn ChangeHandler, sink: &dyn OutputSink) {
    let kind = handler.kind();
    let start = Instant::now();
    sink.line(&format!("[{}] Building {}...", timestamp(), kind));
    match handler.rebuild(sink) {
        Ok(_) => sink.line(&format!(
            "[{}] {} build complete ({})",
            timestamp(),
            kind,
            format_duration(start.elapsed())
        )),
        Err(err) => {
            err.report(sink);
            sink.line(&format!(
                "[{}] {} build failed ({})",
                timestamp(),
                kind,
                format_duration(start.elapsed())
            ));
        }
    }
}

/// Format duration for display
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Get current timestamp for logging
fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = now.as_secs() % 86400; // seconds since midnight
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::output::MemorySink;
    use notify::event::{AccessKind, CreateKind, ModifyKind};
    use std::cell::Cell;
    use std::fs;
    use std::rc::Rc;

    struct CountingHandler<'c> {
        context: &'c BuildContext,
        kind: AssetKind,
        builds: Cell<usize>,
        fail: bool,
    }

    impl ChangeHandler for CountingHandler<'_> {
        fn kind(&self) -> AssetKind {
            self.kind
        }

        fn context(&self) -> &BuildContext {
            self.context
        }

        fn rebuild(&self, _sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
            self.builds.set(self.builds.get() + 1);
            if self.fail {
                Err(BuildError::MissingCapability {
                    capability: "sass compiler",
                    reason: "test".into(),
                })
            } else {
                Ok(self.context.outputs(self.kind))
            }
        }
    }

    /// Queues one more change and an interrupt while its first build runs.
    struct InterruptingHandler<'c> {
        context: &'c BuildContext,
        builds: Rc<Cell<usize>>,
        tx: Sender<WatchMessage>,
        interrupter: Interrupter,
        queued: PathBuf,
    }

    impl ChangeHandler for InterruptingHandler<'_> {
        fn kind(&self) -> AssetKind {
            AssetKind::Sass
        }

        fn context(&self) -> &BuildContext {
            self.context
        }

        fn rebuild(&self, _sink: &dyn OutputSink) -> Result<BuildOutputs, BuildError> {
            self.builds.set(self.builds.get() + 1);
            if self.builds.get() == 1 {
                let event = Event::new(EventKind::Modify(ModifyKind::Any))
                    .add_path(self.queued.clone());
                let _ = self.tx.send(WatchMessage::Fs(Ok(event)));
                self.interrupter.interrupt();
            }
            Ok(self.context.outputs(AssetKind::Sass))
        }
    }

    fn context() -> BuildContext {
        BuildContext::new(default_config(), PathBuf::from("/project"))
    }

    fn counting(context: &BuildContext, kind: AssetKind) -> CountingHandler<'_> {
        CountingHandler { context, kind, builds: Cell::new(0), fail: false }
    }

    fn modify(path: &str) -> Event {
        Event::new(EventKind::Modify(ModifyKind::Any)).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_is_relevant_by_root_and_pattern() {
        let ctx = context();
        assert!(is_relevant(&ctx, AssetKind::Sass, Path::new("/project/scss/_settings.scss")));
        assert!(is_relevant(
            &ctx,
            AssetKind::Sass,
            Path::new("/project/libs/foundation/scss/foundation/components/_grid.scss")
        ));
        assert!(!is_relevant(&ctx, AssetKind::Sass, Path::new("/project/scss/notes.txt")));
        assert!(!is_relevant(&ctx, AssetKind::Sass, Path::new("/elsewhere/app.scss")));
        assert!(is_relevant(
            &ctx,
            AssetKind::Js,
            Path::new("/project/libs/foundation/js/vendor/jquery.js")
        ));
        assert!(!is_relevant(&ctx, AssetKind::Js, Path::new("/project/scss/app.js.scss")));
    }

    #[test]
    fn test_artifacts_are_ignored() {
        let mut config = default_config();
        config.output_root = PathBuf::from("scss");
        config.sass.output = PathBuf::from("out.scss");
        let ctx = BuildContext::new(config, PathBuf::from("/project"));
        assert!(!is_relevant(&ctx, AssetKind::Sass, Path::new("/project/scss/out.scss")));
        assert!(is_relevant(&ctx, AssetKind::Sass, Path::new("/project/scss/in.scss")));
    }

    #[test]
    fn test_event_triggers_matching_kind_once() {
        let ctx = context();
        let watch = Watch::new()
            .with_handler(Box::new(counting(&ctx, AssetKind::Sass)))
            .with_handler(Box::new(counting(&ctx, AssetKind::Js)));

        let event = Event::new(EventKind::Create(CreateKind::File))
            .add_path(PathBuf::from("/project/scss/_a.scss"))
            .add_path(PathBuf::from("/project/scss/_b.scss"));
        let triggered = watch.handle_event(&event, &MemorySink::new());

        assert_eq!(triggered, vec![AssetKind::Sass]);
    }

    #[test]
    fn test_event_touching_both_kinds() {
        let ctx = context();
        let watch = Watch::new()
            .with_handler(Box::new(counting(&ctx, AssetKind::Sass)))
            .with_handler(Box::new(counting(&ctx, AssetKind::Js)));

        let event = modify("/project/scss/app.scss")
            .add_path(PathBuf::from("/project/libs/foundation/js/foundation/foundation.js"));
        assert_eq!(
            watch.handle_event(&event, &MemorySink::new()),
            vec![AssetKind::Sass, AssetKind::Js]
        );
    }

    #[test]
    fn test_access_events_ignored() {
        let ctx = context();
        let watch = Watch::new().with_handler(Box::new(counting(&ctx, AssetKind::Sass)));
        let event = Event::new(EventKind::Access(AccessKind::Any))
            .add_path(PathBuf::from("/project/scss/app.scss"));
        assert!(watch.handle_event(&event, &MemorySink::new()).is_empty());
    }

    #[test]
    fn test_failed_build_is_reported_not_propagated() {
        let ctx = context();
        let sink = MemorySink::new();
        let failing = CountingHandler { fail: true, ..counting(&ctx, AssetKind::Sass) };
        let watch = Watch::new().with_handler(Box::new(failing));

        let triggered = watch.handle_event(&modify("/project/scss/app.scss"), &sink);
        assert_eq!(triggered, vec![AssetKind::Sass]);
        assert!(sink.contains("error: no sass compiler available"));
        assert!(sink.contains("sass build failed"));
    }

    #[test]
    fn test_new_watch_is_idle() {
        assert_eq!(Watch::new().state(), WatchState::Idle);
    }

    #[test]
    fn test_nothing_to_watch() {
        let ctx = BuildContext::new(default_config(), PathBuf::from("/nonexistent/groundwork"));
        let mut watch = Watch::new().with_handler(Box::new(counting(&ctx, AssetKind::Js)));
        let err = watch.start(&MemorySink::new()).unwrap_err();
        assert!(matches!(err, WatchError::NothingToWatch(ref roots) if roots.len() == 2));
        assert_eq!(watch.state(), WatchState::Idle);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 8);
        assert_eq!(&ts[2..3], ":");
        assert_eq!(&ts[5..6], ":");
    }

    #[test]
    fn test_interrupt_during_build_drops_queued_events() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("scss")).unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let builds = Rc::new(Cell::new(0));

        let mut watch = Watch::new();
        let handler = InterruptingHandler {
            context: &ctx,
            builds: Rc::clone(&builds),
            tx: watch.tx.clone(),
            interrupter: watch.interrupter(),
            queued: temp.path().join("scss/_b.scss"),
        };
        watch.add_handler(Box::new(handler));

        let first = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(temp.path().join("scss/_a.scss"));
        watch.tx.send(WatchMessage::Fs(Ok(first))).unwrap();
        let sink = MemorySink::new();
        watch.run(&sink).unwrap();

        assert_eq!(builds.get(), 1);
        assert_eq!(watch.state(), WatchState::Idle);
        assert!(!sink.contains("_b.scss"));
        assert!(sink.contains("Stopped watching"));
    }

    #[test]
    fn test_watch_runs_again_after_interrupt() {
        let temp = tempfile::TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("scss")).unwrap();
        let ctx = BuildContext::new(default_config(), temp.path().to_path_buf());
        let mut watch = Watch::new().with_handler(Box::new(counting(&ctx, AssetKind::Sass)));

        watch.interrupter().interrupt();
        watch.run(&MemorySink::new()).unwrap();

        let event = Event::new(EventKind::Modify(ModifyKind::Any))
            .add_path(temp.path().join("scss/_a.scss"));
        watch.tx.send(WatchMessage::Fs(Ok(event))).unwrap();
        // Queued after the event, without raising the flag
        watch.tx.send(WatchMessage::Interrupt).unwrap();
        let sink = MemorySink::new();
        watch.run(&sink).unwrap();

        assert!(sink.contains("Changed:"));
        assert_eq!(watch.state(), WatchState::Idle);
    }
}
