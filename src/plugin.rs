use crate::catalog::ProductCatalog;
use crate::game::{
    CollectOutcome, JsonFileStore, LevelResult, MemoryStore, PersistedProgress, PlaySession,
    ProgressStore, SlotPos, format_elapsed, resolve_level,
};
use crate::settings::ShopSettings;
use bevy::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Adds the shop catalog, progress and play-session handling to an app
///
/// The rendering and input layers talk to it through messages: send
/// [`StartLevel`] and [`TapSlot`], listen for [`SlotCollected`] and
/// [`LevelCompleted`]. The running session is the [`PlaySession`] resource.
#[derive(Default)]
pub struct ShopPlugin {
    pub settings: ShopSettings,
}

impl ShopPlugin {
    pub fn new(settings: ShopSettings) -> Self {
        Self { settings }
    }
}

impl Plugin for ShopPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .add_message::<StartLevel>()
            .add_message::<TapSlot>()
            .add_message::<SlotCollected>()
            .add_message::<LevelCompleted>()
            .add_message::<ResetProgress>()
            .add_systems(Startup, setup_shop)
            .add_systems(
                Update,
                (
                    reset_progress,
                    start_requested_levels,
                    handle_taps,
                    check_level_completion,
                )
                    .chain(),
            );
    }
}

/// Random source for level generation
#[derive(Resource, Debug)]
pub struct ShopRng(pub StdRng);

/// Where [`PersistedProgress`] is saved
///
/// Insert one before the app starts to override the store picked from settings.
#[derive(Resource)]
pub struct ProgressSaver(pub Box<dyn ProgressStore>);

/// Start a level; `None` starts the player's current level
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartLevel {
    pub level: Option<u32>,
}

impl StartLevel {
    pub fn next() -> Self {
        Self { level: None }
    }

    pub fn number(level: u32) -> Self {
        Self { level: Some(level) }
    }
}

/// The input layer resolved a tap to this grid position
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapSlot(pub SlotPos);

#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotCollected {
    pub pos: SlotPos,
    pub outcome: CollectOutcome,
}

#[derive(Message, Debug, Clone, PartialEq)]
pub struct LevelCompleted(pub LevelResult);

/// Wipe saved progress and start over from level 1
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct ResetProgress;

/// System: load the catalog and saved progress
pub fn setup_shop(
    mut commands: Commands,
    settings: Res<ShopSettings>,
    saver: Option<Res<ProgressSaver>>,
) {
    match ProductCatalog::load() {
        Ok(catalog) => {
            info!("Product catalog loaded: {} items", catalog.len());
            commands.insert_resource(catalog);
        }
        Err(e) => {
            error!("Failed to load product catalog: {}", e);
            panic!("Cannot continue without product data");
        }
    }

    let rng = match settings.seed {
        Some(seed) => {
            info!("Generating levels from seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_os_rng(),
    };
    commands.insert_resource(ShopRng(rng));

    let progress = match saver {
        Some(saver) => load_progress(saver.0.as_ref()),
        None => {
            let store: Box<dyn ProgressStore> = match &settings.save_path {
                Some(path) => Box::new(JsonFileStore::new(path)),
                None => Box::new(MemoryStore::new()),
            };
            let progress = load_progress(store.as_ref());
            commands.insert_resource(ProgressSaver(store));
            progress
        }
    };

    info!(
        "Progress: level {}, {} points, {} stars",
        progress.current_level,
        progress.total_score,
        progress.total_stars()
    );
    commands.insert_resource(progress);
}

fn load_progress(store: &dyn ProgressStore) -> PersistedProgress {
    store.load().unwrap_or_else(|e| {
        warn!("Could not load saved progress, starting fresh: {}", e);
        PersistedProgress::default()
    })
}

fn reset_progress(
    mut requests: MessageReader<ResetProgress>,
    mut progress: ResMut<PersistedProgress>,
    saver: Res<ProgressSaver>,
) {
    if requests.read().last().is_none() {
        return;
    }

    progress.reset();
    if let Err(e) = saver.0.clear() {
        error!("Failed to clear saved progress: {}", e);
    }
    info!("Progress reset");
}

/// System: build a fresh session for each start request (the last one wins)
pub fn start_requested_levels(
    mut commands: Commands,
    mut requests: MessageReader<StartLevel>,
    catalog: Res<ProductCatalog>,
    progress: Res<PersistedProgress>,
    mut rng: ResMut<ShopRng>,
    time: Res<Time>,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let level = resolve_level(request.level.unwrap_or(progress.current_level));
    let number = level.id;

    match PlaySession::start(level, &catalog, &mut rng.0, time.elapsed_secs_f64()) {
        Ok(session) => {
            let level = session.level();
            info!(
                "Level {} \"{}\" ({} aisle, {}): find {} items on {}x{} shelves",
                level.id,
                level.name,
                level.aisle,
                level.difficulty,
                session.shopping_list().len(),
                level.shelf_count,
                level.items_per_shelf
            );
            let labels: Vec<_> = session
                .shopping_list()
                .entries()
                .iter()
                .map(|entry| entry.label(level.difficulty).unwrap_or("?"))
                .collect();
            info!("Shopping list: {}", labels.join(", "));
            commands.insert_resource(session);
        }
        Err(e) => error!("Could not start level {}: {}", number, e),
    }
}

/// System: apply taps to the running session
pub fn handle_taps(
    mut taps: MessageReader<TapSlot>,
    session: Option<ResMut<PlaySession>>,
    mut collected: MessageWriter<SlotCollected>,
) {
    let Some(mut session) = session else {
        taps.clear();
        return;
    };

    for TapSlot(pos) in taps.read().copied() {
        // Taps after the last find don't count against the player
        if session.is_complete() {
            continue;
        }
        let outcome = session.collect(pos);
        collected.write(SlotCollected { pos, outcome });
    }
}

/// System: score a finished session, record it and end it
pub fn check_level_completion(
    mut commands: Commands,
    session: Option<Res<PlaySession>>,
    mut progress: ResMut<PersistedProgress>,
    saver: Res<ProgressSaver>,
    settings: Res<ShopSettings>,
    time: Res<Time>,
    mut completed: MessageWriter<LevelCompleted>,
) {
    let Some(session) = session else {
        return;
    };
    if !session.is_complete() {
        return;
    }

    let result = session.finish(time.elapsed_secs_f64());
    progress.record(&result);

    info!(
        "Level {} complete in {}: +{} points, {} star(s), {} mistake(s)",
        result.level,
        format_elapsed(result.elapsed_seconds),
        result.score,
        result.stars,
        result.mistakes
    );

    if settings.autosave {
        if let Err(e) = saver.0.save(&progress) {
            error!("Failed to save progress: {}", e);
        }
    }

    completed.write(LevelCompleted(result));
    commands.remove_resource::<PlaySession>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Completed(Vec<LevelResult>);

    fn record_completed(mut reader: MessageReader<LevelCompleted>, mut out: ResMut<Completed>) {
        out.0.extend(reader.read().map(|m| m.0.clone()));
    }

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(ShopPlugin::new(ShopSettings::default().with_seed(7)))
            .init_resource::<Completed>()
            .add_systems(Update, record_completed.after(check_level_completion));
        app.update();
        app
    }

    fn positions(app: &App, targets: bool) -> Vec<SlotPos> {
        app.world()
            .resource::<PlaySession>()
            .layout()
            .slots()
            .iter()
            .filter(|s| s.is_target() == targets)
            .map(|s| s.pos())
            .collect()
    }

    #[test]
    fn test_startup_inserts_resources() {
        let app = test_app();
        let world = app.world();

        assert!(world.contains_resource::<ProductCatalog>());
        assert!(world.contains_resource::<ShopRng>());
        assert!(world.contains_resource::<ProgressSaver>());
        assert_eq!(
            world.resource::<PersistedProgress>(),
            &PersistedProgress::default()
        );
        assert!(!world.contains_resource::<PlaySession>());
    }

    #[test]
    fn test_start_level_creates_session() {
        let mut app = test_app();
        app.world_mut().write_message(StartLevel::number(4));
        app.update();

        let session = app.world().resource::<PlaySession>();
        assert_eq!(session.level().id, 4);
        assert_eq!(session.shopping_list().len(), 4);
        assert_eq!(session.layout().len(), 36);
    }

    #[test]
    fn test_playing_a_level_records_progress() {
        let mut app = test_app();
        app.world_mut().write_message(StartLevel::next());
        app.update();

        let wrong = positions(&app, false)[0];
        app.world_mut().write_message(TapSlot(wrong));
        for pos in positions(&app, true) {
            app.world_mut().write_message(TapSlot(pos));
        }
        app.update();

        assert!(!app.world().contains_resource::<PlaySession>());

        let completed = &app.world().resource::<Completed>().0;
        assert_eq!(completed.len(), 1);
        let result = &completed[0];
        assert_eq!(result.level, 1);
        assert_eq!(result.items_found, 2);
        assert_eq!(result.mistakes, 1);

        let progress = app.world().resource::<PersistedProgress>();
        assert_eq!(progress.current_level, 2);
        assert_eq!(progress.total_score, result.score);
        assert_eq!(progress.best_stars(1), Some(result.stars));

        // Autosave wrote through to the store
        let saved = app.world().resource::<ProgressSaver>().0.load().unwrap();
        assert_eq!(&saved, progress);
    }

    #[test]
    fn test_taps_without_session_are_dropped() {
        let mut app = test_app();
        app.world_mut().write_message(TapSlot(SlotPos::new(0, 0)));
        app.update();

        app.world_mut().write_message(StartLevel::next());
        app.update();

        let session = app.world().resource::<PlaySession>();
        assert_eq!(session.mistakes(), 0);
        assert_eq!(session.found_count(), 0);
    }

    #[test]
    fn test_reset_progress() {
        let mut app = test_app();
        app.world_mut().resource_mut::<PersistedProgress>().current_level = 9;
        app.world_mut().write_message(ResetProgress);
        app.update();

        assert_eq!(
            app.world().resource::<PersistedProgress>(),
            &PersistedProgress::default()
        );
    }

    #[test]
    fn test_injected_store_is_used() {
        let store = MemoryStore::new();
        let saved = PersistedProgress {
            current_level: 5,
            total_score: 1200,
            ..Default::default()
        };
        store.save(&saved).unwrap();

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(ProgressSaver(Box::new(store)))
            .add_plugins(ShopPlugin::default());
        app.update();

        assert_eq!(app.world().resource::<PersistedProgress>(), &saved);

        app.world_mut().write_message(StartLevel::next());
        app.update();
        assert_eq!(app.world().resource::<PlaySession>().level().id, 5);
    }
}
