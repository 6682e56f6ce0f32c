//! Owner of the live theme
//!
//! `ThemeManager` holds the one `Configuration` the overlay renders with. It
//! is created by the host and initialized lazily on first access:
//!
//! 1. the user's saved `theme.json`
//! 2. otherwise a discovered theme package, chosen by [`CandidateOrder`]
//! 3. otherwise the platform defaults
//!
//! The manager is single-threaded. It holds `Rc` handles to the engine and
//! font provider, so it is neither `Send` nor `Sync`; hosts that need access
//! from several threads must wrap initialization in their own lock.
//!
//! Only the presentation modes and font settings have a live path into the
//! engine. Colors and the other numeric fields are edited through
//! [`ThemeManager::config_mut`] and take effect when the renderer next reads
//! the configuration.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, error, info, warn};

use crate::constants::scale::{DEFAULT_SCALE, SESSION_KEY};
use crate::engine::{DetachedEngine, FontProvider, RenderEngine};
use crate::error::LoadError;
use crate::font_discovery::FontconfigProvider;
use crate::paths::HostPaths;
use crate::session::SessionStore;
use crate::theme::codec::{to_flat_map, write_pretty};
use crate::theme::{
    deserialize, list_available, resolve_defaults, CandidateOrder, ComponentTheme, Configuration,
    LayoutMode, ParseReport, Parsed, Platform, RendererKind, ThemeMeta,
};

/// Where the live configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeSource {
    /// The user's saved theme
    Saved(PathBuf),
    /// A discovered package, used because no saved theme could be loaded
    Package(ThemeMeta),
    /// Explicitly loaded with [`ThemeManager::load`]
    File(PathBuf),
    /// Platform defaults
    Defaults,
}

#[derive(Debug)]
struct Ready {
    config: Configuration,
    source: ThemeSource,
}

pub struct ThemeManager {
    paths: HostPaths,
    platform: Platform,
    order: CandidateOrder,
    engine: Rc<dyn RenderEngine>,
    fonts: Rc<dyn FontProvider>,
    session: SessionStore,
    ready: Option<Ready>,
}

impl ThemeManager {
    /// Manager with no renderer attached and system fonts from fontconfig
    pub fn new(paths: HostPaths, platform: Platform) -> Self {
        Self {
            paths,
            platform,
            order: CandidateOrder::default(),
            engine: Rc::new(DetachedEngine),
            fonts: Rc::new(FontconfigProvider),
            session: SessionStore::new(),
            ready: None,
        }
    }

    pub fn with_engine(mut self, engine: Rc<dyn RenderEngine>) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_fonts(mut self, fonts: Rc<dyn FontProvider>) -> Self {
        self.fonts = fonts;
        self
    }

    pub fn with_candidate_order(mut self, order: CandidateOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_session(mut self, session: SessionStore) -> Self {
        self.session = session;
        self
    }

    pub fn paths(&self) -> &HostPaths {
        &self.paths
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn is_initialized(&self) -> bool {
        self.ready.is_some()
    }

    /// Source of the live configuration, `None` before initialization
    pub fn source(&self) -> Option<&ThemeSource> {
        self.ready.as_ref().map(|ready| &ready.source)
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionStore {
        &mut self.session
    }

    /// Live configuration, initializing on first call
    pub fn get(&mut self) -> &Configuration {
        &self.ready_mut().config
    }

    /// Direct field access without engine propagation
    pub fn config_mut(&mut self) -> &mut Configuration {
        &mut self.ready_mut().config
    }

    fn ready_mut(&mut self) -> &mut Ready {
        let ready = match self.ready.take() {
            Some(ready) => ready,
            None => self.initialize(),
        };
        self.ready.insert(ready)
    }

    fn initialize(&mut self) -> Ready {
        let saved = self.paths.saved_theme();
        let ready = match self.read_theme(&saved) {
            Ok(parsed) => {
                info!(path = %saved.display(), name = %parsed.config.name, "Loaded saved theme");
                Ready {
                    config: parsed.config,
                    source: ThemeSource::Saved(saved),
                }
            }
            Err(e) => {
                info!(error = %e, "No usable saved theme, looking for theme packages");
                self.load_first_package()
            }
        };

        self.apply_modes(&ready.config);
        self.publish(&ready.config);
        ready
    }

    fn load_first_package(&self) -> Ready {
        let candidates = list_available(&self.paths);
        if let Some(meta) = self.order.pick(&candidates) {
            match self.read_theme(&meta.path) {
                Ok(parsed) => {
                    info!(name = %meta.name, path = %meta.path.display(), "Loaded theme package");
                    return Ready {
                        config: parsed.config,
                        source: ThemeSource::Package(meta.clone()),
                    };
                }
                Err(e) => warn!(error = %e, "Failed to load theme package"),
            }
        }

        info!(platform = ?self.platform, "Using default theme");
        Ready {
            config: resolve_defaults(self.platform),
            source: ThemeSource::Defaults,
        }
    }

    /// Read and parse `path`, logging field warnings
    fn read_theme(&self, path: &Path) -> Result<Parsed, LoadError> {
        if !path.exists() {
            return Err(LoadError::NotFound {
                path: path.to_path_buf(),
                source: None,
            });
        }
        let bytes = fs::read(path).map_err(|e| LoadError::NotFound {
            path: path.to_path_buf(),
            source: Some(e),
        })?;
        let parsed = deserialize(&bytes, self.platform).map_err(|source| LoadError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        for warning in parsed.report.warnings() {
            warn!(path = %path.display(), "Failed to read {warning}");
        }
        Ok(parsed)
    }

    /// Replace the live configuration with the theme at `path`
    ///
    /// A missing or malformed file leaves the current state untouched. A
    /// successful parse starts from the defaults, so fields absent from the
    /// file do not survive from the previous theme.
    pub fn load(&mut self, path: &Path) -> Result<ParseReport, LoadError> {
        self.ready_mut();
        let parsed = self.read_theme(path)?;

        self.apply_modes(&parsed.config);
        self.publish(&parsed.config);
        info!(path = %path.display(), name = %parsed.config.name, warnings = parsed.report.len(), "Loaded theme");
        self.ready = Some(Ready {
            config: parsed.config,
            source: ThemeSource::File(path.to_path_buf()),
        });
        Ok(parsed.report)
    }

    /// Push renderer, layout and component theme to an active engine
    fn apply_modes(&self, config: &Configuration) {
        if !self.engine.is_active() {
            return;
        }
        self.engine.set_renderer(config.renderer);
        self.engine.set_layout_mode(config.layout);
        self.engine.set_component_theme(config.style);
    }

    /// Flattened copy for components that read the session store
    fn publish(&mut self, config: &Configuration) {
        self.session.extend(to_flat_map(config));
    }

    /// Write the live theme to `path`
    ///
    /// Failures are logged and otherwise ignored; re-read the file if the
    /// caller needs to know that it was written.
    pub fn save(&mut self, path: &Path) {
        let config = &self.ready_mut().config;
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                error!(path = %path.display(), error = %e, "Failed to open theme file for writing");
                return;
            }
        };
        match write_pretty(config, BufWriter::new(file)) {
            Ok(()) => info!(path = %path.display(), "Saved theme"),
            Err(e) => error!(path = %path.display(), error = %e, "Failed to write theme file"),
        }
    }

    /// Write the live theme to the user's saved theme location
    pub fn save_default(&mut self) {
        if let Err(e) = fs::create_dir_all(&self.paths.save_dir) {
            error!(dir = %self.paths.save_dir.display(), error = %e, "Failed to create save directory");
        }
        let path = self.paths.saved_theme();
        self.save(&path);
    }

    pub fn set_renderer(&mut self, renderer: RendererKind) {
        self.ready_mut();
        if self.engine.is_active() {
            debug!(?renderer, "Pushing renderer to engine");
            self.engine.set_renderer(renderer);
        }
        self.config_mut().renderer = renderer;
    }

    pub fn set_layout_mode(&mut self, layout: LayoutMode) {
        self.ready_mut();
        if self.engine.is_active() {
            debug!(?layout, "Pushing layout mode to engine");
            self.engine.set_layout_mode(layout);
        }
        self.config_mut().layout = layout;
    }

    pub fn set_component_theme(&mut self, theme: ComponentTheme) {
        self.ready_mut();
        if self.engine.is_active() {
            debug!(?theme, "Pushing component theme to engine");
            self.engine.set_component_theme(theme);
        }
        self.config_mut().style = theme;
    }

    /// Select a font by name; the name is not checked against the font list
    pub fn set_selected_font(&mut self, name: &str) {
        self.ready_mut();
        if self.engine.is_active() {
            debug!(font = name, "Pushing font to engine");
            self.engine.set_font(name);
        }
        self.config_mut().font = name.to_string();
    }

    /// Select the `index`th entry of [`Self::font_names`]; out of range is a no-op
    pub fn set_selected_font_index(&mut self, index: usize) {
        let names = self.font_names();
        if let Some(name) = names.get(index) {
            self.set_selected_font(name);
        }
    }

    pub fn set_font_size(&mut self, size: f32) {
        self.ready_mut();
        if self.engine.is_active() {
            self.engine.set_font_size(size);
        }
        self.config_mut().font_size = size;
    }

    /// Fonts the engine can load, in provider order
    pub fn font_names(&self) -> Vec<String> {
        self.fonts
            .fetch_available_fonts()
            .into_iter()
            .map(|font| font.name)
            .collect()
    }

    /// Stored scale x session override (`ui.scale`, default 1.0) x platform scale
    pub fn effective_scale(&mut self) -> f32 {
        let base = self.get().ui_scale;
        base * self.session.get_or(SESSION_KEY, 1.0f32) * DEFAULT_SCALE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::StaticFonts;
    use std::cell::{Cell, RefCell};
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq)]
    enum EngineCall {
        Renderer(RendererKind),
        Layout(LayoutMode),
        Theme(ComponentTheme),
        Font(String),
        FontSize(f32),
    }

    #[derive(Default)]
    struct RecordingEngine {
        active: Cell<bool>,
        calls: RefCell<Vec<EngineCall>>,
    }

    impl RecordingEngine {
        fn active() -> Rc<Self> {
            let engine = Self::default();
            engine.active.set(true);
            Rc::new(engine)
        }

        fn take_calls(&self) -> Vec<EngineCall> {
            self.calls.take()
        }
    }

    impl RenderEngine for RecordingEngine {
        fn is_active(&self) -> bool {
            self.active.get()
        }

        fn set_renderer(&self, renderer: RendererKind) {
            self.calls.borrow_mut().push(EngineCall::Renderer(renderer));
        }

        fn set_layout_mode(&self, layout: LayoutMode) {
            self.calls.borrow_mut().push(EngineCall::Layout(layout));
        }

        fn set_component_theme(&self, theme: ComponentTheme) {
            self.calls.borrow_mut().push(EngineCall::Theme(theme));
        }

        fn set_font(&self, name: &str) {
            self.calls.borrow_mut().push(EngineCall::Font(name.to_string()));
        }

        fn set_font_size(&self, size: f32) {
            self.calls.borrow_mut().push(EngineCall::FontSize(size));
        }
    }

    struct Host {
        _root: TempDir,
        paths: HostPaths,
    }

    impl Host {
        fn new() -> Self {
            let root = TempDir::new().unwrap();
            let paths = HostPaths {
                save_dir: root.path().join("save"),
                resources_dir: root.path().join("resources"),
                packages_dir: root.path().join("themes"),
            };
            fs::create_dir_all(&paths.save_dir).unwrap();
            fs::create_dir_all(&paths.resources_dir).unwrap();
            Self { _root: root, paths }
        }

        fn write_saved(&self, body: &str) {
            fs::write(self.paths.saved_theme(), body).unwrap();
        }

        fn write_package(&self, file: &str, body: &str) -> PathBuf {
            let path = self.paths.resources_dir.join(file);
            fs::write(&path, body).unwrap();
            path
        }

        fn manager(&self) -> ThemeManager {
            ThemeManager::new(self.paths.clone(), Platform::Desktop)
                .with_fonts(Rc::new(StaticFonts(vec!["Alpha".into(), "Beta".into()])))
        }
    }

    fn named(name: &str) -> String {
        format!(r#"{{"details": {{"name": "{name}"}}}}"#)
    }

    #[test]
    fn test_lazy_initialization() {
        let host = Host::new();
        let mut manager = host.manager();

        assert!(!manager.is_initialized());
        assert_eq!(manager.source(), None);
        manager.get();
        assert!(manager.is_initialized());
    }

    #[test]
    fn test_init_prefers_saved_theme() {
        let host = Host::new();
        host.write_saved(&named("Saved"));
        host.write_package("package.json", &named("Package"));
        let mut manager = host.manager();

        assert_eq!(manager.get().name, "Saved");
        assert_eq!(manager.source(), Some(&ThemeSource::Saved(host.paths.saved_theme())));
    }

    #[test]
    fn test_init_falls_back_to_package_by_name() {
        let host = Host::new();
        host.write_saved("{ broken");
        host.write_package("zeta.json", &named("Zeta"));
        let alpha = host.write_package("alpha.json", &named("Alpha"));
        let mut manager = host.manager();

        assert_eq!(manager.get().name, "Alpha");
        assert_eq!(
            manager.source(),
            Some(&ThemeSource::Package(ThemeMeta {
                name: "Alpha".to_string(),
                path: alpha,
            }))
        );
    }

    #[test]
    fn test_init_enumeration_order_with_single_package() {
        let host = Host::new();
        host.write_package("only.json", &named("Only"));
        let mut manager = host.manager().with_candidate_order(CandidateOrder::Enumeration);

        assert_eq!(manager.get().name, "Only");
    }

    #[test]
    fn test_init_falls_back_to_defaults() {
        let host = Host::new();
        let mut manager = host.manager();

        assert_eq!(*manager.get(), resolve_defaults(Platform::Desktop));
        assert_eq!(manager.source(), Some(&ThemeSource::Defaults));
        assert!(host.paths.packages_dir.is_dir());
    }

    #[test]
    fn test_init_happens_once() {
        let host = Host::new();
        host.write_saved(&named("First"));
        let mut manager = host.manager();

        assert_eq!(manager.get().name, "First");
        host.write_saved(&named("Second"));
        fs::remove_dir_all(&host.paths.resources_dir).unwrap();

        assert_eq!(manager.get().name, "First");
        assert_eq!(manager.source(), Some(&ThemeSource::Saved(host.paths.saved_theme())));
    }

    #[test]
    fn test_init_publishes_flat_theme_to_session() {
        let host = Host::new();
        host.write_saved(&named("Published"));
        let mut manager = host.manager();
        manager.get();

        assert_eq!(manager.session().get::<String>("name").as_deref(), Some("Published"));
        assert_eq!(manager.session().get::<u8>("layout"), Some(0));
        assert!(manager.session().get_raw("details").is_none());
    }

    #[test]
    fn test_init_pushes_modes_to_active_engine() {
        let host = Host::new();
        host.write_saved(r#"{"details": {"name": "x", "renderer": 1, "layout": 1, "style": 2}}"#);
        let engine = RecordingEngine::active();
        let mut manager = host.manager().with_engine(engine.clone());
        manager.get();

        assert_eq!(
            engine.take_calls(),
            [
                EngineCall::Renderer(RendererKind::Native),
                EngineCall::Layout(LayoutMode::Panel),
                EngineCall::Theme(ComponentTheme::Classic),
            ]
        );
    }

    #[test]
    fn test_load_missing_file_keeps_state() {
        let host = Host::new();
        let mut manager = host.manager();
        manager.config_mut().border_size = 9.0;
        manager.config_mut().name = "Edited".to_string();
        let before = manager.get().clone();

        let err = manager.load(Path::new("/nonexistent/path/theme.json")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert_eq!(*manager.get(), before);
    }

    #[test]
    fn test_load_malformed_file_keeps_state() {
        let host = Host::new();
        let broken = host.write_package("broken.json", "not json");
        let mut manager = host.manager();
        manager.config_mut().frame_padding = 11.0;

        let err = manager.load(&broken).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
        assert_eq!(err.path(), &broken);
        assert_eq!(manager.get().frame_padding, 11.0);
    }

    #[test]
    fn test_load_resets_to_defaults_before_applying() {
        let host = Host::new();
        let partial = host.write_package("partial.json", &named("Partial"));
        let mut manager = host.manager();
        manager.config_mut().border_size = 9.0;
        manager.config_mut().blur_enabled = false;

        let report = manager.load(&partial).unwrap();
        let config = manager.get().clone();
        let defaults = resolve_defaults(Platform::Desktop);

        assert_eq!(config.name, "Partial");
        assert_eq!(config.border_size, defaults.border_size);
        assert!(config.blur_enabled);
        assert!(report.get("other.borderSize").is_some());
        assert!(report.get("details.name").is_none());
        assert_eq!(manager.source(), Some(&ThemeSource::File(partial)));
    }

    #[test]
    fn test_active_engine_receives_component_theme_once() {
        let host = Host::new();
        let engine = RecordingEngine::active();
        let mut manager = host.manager().with_engine(engine.clone());
        manager.get();
        engine.take_calls();

        manager.set_component_theme(ComponentTheme::Compact);

        assert_eq!(engine.take_calls(), [EngineCall::Theme(ComponentTheme::Compact)]);
        assert_eq!(manager.get().style, ComponentTheme::Compact);
    }

    #[test]
    fn test_inactive_engine_is_not_called() {
        let host = Host::new();
        let engine = Rc::new(RecordingEngine::default());
        let mut manager = host.manager().with_engine(engine.clone());

        manager.set_component_theme(ComponentTheme::Standard);
        manager.set_renderer(RendererKind::Native);
        manager.set_layout_mode(LayoutMode::Panel);
        manager.set_selected_font("Beta");
        manager.set_font_size(13.0);

        assert!(engine.take_calls().is_empty());
        let config = manager.get();
        assert_eq!(config.style, ComponentTheme::Standard);
        assert_eq!(config.renderer, RendererKind::Native);
        assert_eq!(config.layout, LayoutMode::Panel);
        assert_eq!(config.font, "Beta");
        assert_eq!(config.font_size, 13.0);
    }

    #[test]
    fn test_mode_and_font_setters_propagate() {
        let host = Host::new();
        let engine = RecordingEngine::active();
        let mut manager = host.manager().with_engine(engine.clone());
        manager.get();
        engine.take_calls();

        manager.set_renderer(RendererKind::Native);
        manager.set_layout_mode(LayoutMode::Panel);
        manager.set_selected_font("Gamma");
        manager.set_font_size(30.0);

        assert_eq!(
            engine.take_calls(),
            [
                EngineCall::Renderer(RendererKind::Native),
                EngineCall::Layout(LayoutMode::Panel),
                EngineCall::Font("Gamma".to_string()),
                EngineCall::FontSize(30.0),
            ]
        );
    }

    #[test]
    fn test_font_index_selection() {
        let host = Host::new();
        let engine = RecordingEngine::active();
        let mut manager = host.manager().with_engine(engine.clone());
        manager.get();
        engine.take_calls();

        manager.set_selected_font_index(1);
        assert_eq!(manager.get().font, "Beta");

        manager.set_selected_font_index(2);
        assert_eq!(manager.get().font, "Beta");
        assert_eq!(engine.take_calls(), [EngineCall::Font("Beta".to_string())]);
    }

    #[test]
    fn test_effective_scale_composition() {
        let host = Host::new();
        let mut manager = host.manager();
        manager.config_mut().ui_scale = 1.2;

        manager.session_mut().set(SESSION_KEY, 1.0);
        assert_eq!(manager.effective_scale(), 1.2 * 1.0 * DEFAULT_SCALE);

        manager.session_mut().set(SESSION_KEY, 2.0);
        assert_eq!(manager.effective_scale(), 1.2 * 2.0 * DEFAULT_SCALE);
        assert_eq!(manager.get().ui_scale, 1.2);
    }

    #[test]
    fn test_effective_scale_without_session_override() {
        let host = Host::new();
        let mut manager = host.manager();
        manager.config_mut().ui_scale = 1.5;

        assert_eq!(manager.effective_scale(), 1.5 * DEFAULT_SCALE);
    }

    #[test]
    fn test_save_round_trips() {
        let host = Host::new();
        let mut manager = host.manager();
        manager.config_mut().name = "Exported".to_string();
        manager.config_mut().window_rounding = 2.5;
        manager.set_layout_mode(LayoutMode::Panel);
        let expected = manager.get().clone();

        manager.save_default();

        let mut reloaded = host.manager();
        assert_eq!(*reloaded.get(), expected);
        assert_eq!(reloaded.source(), Some(&ThemeSource::Saved(host.paths.saved_theme())));
    }

    #[test]
    fn test_save_to_unwritable_path_is_silent() {
        let host = Host::new();
        let mut manager = host.manager();
        let target = host.paths.save_dir.join("missing-dir").join("theme.json");

        manager.save(&target);
        assert!(!target.exists());
    }

    #[test]
    fn test_font_names_come_from_provider() {
        let host = Host::new();
        assert_eq!(host.manager().font_names(), ["Alpha", "Beta"]);
    }
}
