use bevy::prelude::*;
use rps_arena::{Arena, Kind, Simulation};
use std::path::Path;

/// Directory bevy's asset server reads from
const ASSET_DIR: &str = "assets";

#[derive(Component)]
pub struct MainCamera;

/// Links a sprite entity to the agent at `index` and remembers the kind it shows.
#[derive(Component)]
pub struct AgentSprite {
    pub index: usize,
    pub kind: Kind,
}

/// One sprite template per kind, indexed by `Kind::index`.
#[derive(Resource)]
pub struct KindVisuals {
    sprites: [Sprite; 3],
}

impl KindVisuals {
    pub fn sprite(&self, kind: Kind) -> Sprite {
        self.sprites[kind.index()].clone()
    }
}

/// Swatch colour per kind: gray rock, white paper, red scissors.
pub fn kind_rgb(kind: Kind) -> [u8; 3] {
    match kind {
        Kind::Rock => [100, 100, 100],
        Kind::Paper => [255, 255, 255],
        Kind::Scissors => [255, 0, 0],
    }
}

pub fn kind_color(kind: Kind) -> Color {
    let [r, g, b] = kind_rgb(kind);
    Color::srgb_u8(r, g, b)
}

fn image_file(kind: Kind) -> &'static str {
    match kind {
        Kind::Rock => "rock.png",
        Kind::Paper => "paper.png",
        Kind::Scissors => "scissors.png",
    }
}

/// Arena positions are top-left sprite corners with y pointing down; bevy
/// places sprite centres with y pointing up around the window centre.
pub fn arena_to_world(position: Vec2, arena: &Arena) -> Vec3 {
    let half = arena.footprint * 0.5;
    Vec3::new(
        position.x + half - arena.width * 0.5,
        arena.height * 0.5 - position.y - half,
        0.0,
    )
}

pub fn setup_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera, Transform::from_xyz(0.0, 0.0, 0.0)));
}

/// Load per-kind images, falling back to flat colour swatches when a file is missing
pub fn load_kind_visuals(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    simulation: Res<Simulation>,
) {
    let size = Vec2::splat(simulation.population().arena().footprint);

    let sprites = Kind::ALL.map(|kind| {
        let file = image_file(kind);
        if Path::new(ASSET_DIR).join(file).exists() {
            Sprite {
                image: asset_server.load(file),
                custom_size: Some(size),
                ..default()
            }
        } else {
            warn!("{}/{} not found, drawing {} as a colour swatch", ASSET_DIR, file, kind);
            Sprite::from_color(kind_color(kind), size)
        }
    });

    commands.insert_resource(KindVisuals { sprites });
}

/// Spawn one sprite entity per agent
pub fn spawn_agent_sprites(
    mut commands: Commands,
    simulation: Res<Simulation>,
    visuals: Res<KindVisuals>,
) {
    let arena = *simulation.population().arena();
    for (index, (kind, position)) in simulation.snapshot().enumerate() {
        commands.spawn((
            AgentSprite { index, kind },
            visuals.sprite(kind),
            Transform::from_translation(arena_to_world(position, &arena)),
        ));
    }
}

/// System to copy agent positions and kinds onto their sprites
pub fn sync_agent_sprites(
    simulation: Res<Simulation>,
    visuals: Res<KindVisuals>,
    mut sprites: Query<(&mut AgentSprite, &mut Transform, &mut Sprite)>,
) {
    let arena = simulation.population().arena();
    let agents = simulation.population().agents();

    for (mut marker, mut transform, mut sprite) in sprites.iter_mut() {
        let Some(agent) = agents.get(marker.index) else {
            continue;
        };
        transform.translation = arena_to_world(agent.position, arena);

        // Only swap the sprite when a contest changed the kind
        if marker.kind != agent.kind {
            *sprite = visuals.sprite(agent.kind);
            marker.kind = agent.kind;
        }
    }
}
