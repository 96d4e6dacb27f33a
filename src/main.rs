use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use rand::Rng;
use shelf_seek::PlaySession;
use shelf_seek::plugin::{LevelCompleted, ShopRng, StartLevel, TapSlot};
use shelf_seek::{ShopPlugin, ShopSettings};
use std::time::Duration;

const SETTINGS_PATH: &str = "shelf_seek.json";
const LEVELS_TO_PLAY: usize = 5;
/// Chance the autoplayer taps a random product instead of a list item
const MISTAKE_CHANCE: f64 = 0.2;

/// Headless run: plays a handful of levels with a scripted shopper and logs the results
fn main() {
    let settings = ShopSettings::load(SETTINGS_PATH).unwrap_or_else(|e| {
        eprintln!("Ignoring {}: {}", SETTINGS_PATH, e);
        ShopSettings::default()
    });

    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(50))),
        )
        .add_plugins(LogPlugin::default())
        .add_plugins(ShopPlugin::new(settings))
        .init_resource::<LevelsPlayed>()
        .add_systems(Startup, |mut start: MessageWriter<StartLevel>| {
            start.write(StartLevel::next());
        })
        .add_systems(Update, (autoplay_tap, next_level_or_exit))
        .run();
}

#[derive(Resource, Default)]
struct LevelsPlayed(usize);

/// One tap per frame: usually the next list item, sometimes a random slot
fn autoplay_tap(
    session: Option<Res<PlaySession>>,
    mut rng: ResMut<ShopRng>,
    mut taps: MessageWriter<TapSlot>,
) {
    let Some(session) = session else {
        return;
    };

    let layout = session.layout();
    let pos = if rng.0.random_bool(MISTAKE_CHANCE) {
        let index = rng.0.random_range(0..layout.len());
        layout.slots()[index].pos()
    } else {
        let Some(target) = session
            .shopping_list()
            .remaining()
            .find_map(|entry| layout.target_slot(entry.id))
        else {
            return;
        };
        target.pos()
    };

    taps.write(TapSlot(pos));
}

fn next_level_or_exit(
    mut completed: MessageReader<LevelCompleted>,
    mut played: ResMut<LevelsPlayed>,
    mut start: MessageWriter<StartLevel>,
    mut exit: MessageWriter<AppExit>,
) {
    for LevelCompleted(result) in completed.read() {
        played.0 += 1;
        info!(
            "Shopper finished level {} with {} star(s)",
            result.level, result.stars
        );

        if played.0 >= LEVELS_TO_PLAY {
            exit.write(AppExit::Success);
        } else {
            start.write(StartLevel::next());
        }
    }
}
