//! Command-line host for the room layout engine.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use kurbo::Point;
use roomdesign_core::{
    DesignerConfig, DesignerError, DisplayList, FileStorage, OpeningKind, PresetKind, Room,
    RoomDesigner, RoomError, Storage, StorageError, UnknownPreset, WallId, format_feet_inches,
};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Designer(#[from] DesignerError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Preset(#[from] UnknownPreset),
    #[error("saved room {name:?} cannot be shown: {source}")]
    Load { name: String, source: RoomError },
    #[error("failed to read config {path}: {message}")]
    Config { path: PathBuf, message: String },
    #[error("failed to write {path}: {source}")]
    Write { path: PathBuf, source: std::io::Error },
    #[error("opening refers to wall #{0}, but only {1} walls were given")]
    NoSuchWall(usize, usize),
    #[error("opening refers to wall #{0}, which snapped to zero length and was skipped")]
    SkippedWall(usize),
}

#[derive(Parser, Debug)]
#[command(name = "roomdesign", about = "Lay out rooms with walls, doors and windows")]
struct Cli {
    /// Directory holding saved rooms.
    #[arg(long, env = "ROOMDESIGN_STORE")]
    store: Option<PathBuf>,

    /// JSON designer config; missing fields use defaults.
    #[arg(long, env = "ROOMDESIGN_CONFIG")]
    config: Option<PathBuf>,

    /// Canvas width in pixels.
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    /// Canvas height in pixels.
    #[arg(long, default_value_t = 600.0)]
    height: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a preset room (straight, l-shaped, u-shaped, closed).
    Preset {
        kind: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Draw walls and place openings.
    Draw(DrawArgs),
    /// Print a saved room.
    Show {
        name: String,
        #[arg(long)]
        svg: Option<PathBuf>,
    },
    /// List saved rooms.
    List,
    /// Delete a saved room.
    Delete { name: String },
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Save the room under this name.
    #[arg(long)]
    save: Option<String>,
    /// Write the rendered room as SVG.
    #[arg(long)]
    svg: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct DrawArgs {
    /// Wall as `x1,y1,x2,y2` in pixels; endpoints snap to the grid.
    #[arg(long = "wall", value_parser = parse_wall, required = true)]
    walls: Vec<(Point, Point)>,
    /// Door as `WALL:POSITION`, wall numbered from 0 in drawing order.
    #[arg(long = "door", value_parser = parse_opening)]
    doors: Vec<(usize, f64)>,
    /// Window as `WALL:POSITION`.
    #[arg(long = "window", value_parser = parse_opening)]
    windows: Vec<(usize, f64)>,
    #[command(flatten)]
    output: OutputArgs,
}

fn parse_wall(s: &str) -> Result<(Point, Point), String> {
    let values: Vec<f64> = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|e| format!("{v:?}: {e}")))
        .collect::<Result<_, _>>()?;
    match values.as_slice() {
        [x1, y1, x2, y2] => Ok((Point::new(*x1, *y1), Point::new(*x2, *y2))),
        _ => Err(format!("expected x1,y1,x2,y2, got {s:?}")),
    }
}

fn parse_opening(s: &str) -> Result<(usize, f64), String> {
    let (wall, position) = s
        .split_once(':')
        .ok_or_else(|| format!("expected WALL:POSITION, got {s:?}"))?;
    let wall = wall.trim().parse().map_err(|e| format!("wall {wall:?}: {e}"))?;
    let position = position
        .trim()
        .parse()
        .map_err(|e| format!("position {position:?}: {e}"))?;
    Ok((wall, position))
}

fn load_config(path: Option<&Path>) -> Result<DesignerConfig, CliError> {
    let Some(path) = path else {
        return Ok(DesignerConfig::default());
    };
    let json = fs::read_to_string(path).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    DesignerConfig::from_json(&json).map_err(|e| CliError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn open_storage(path: Option<PathBuf>) -> Result<FileStorage, CliError> {
    let storage = match path {
        Some(path) => FileStorage::new(path)?,
        None => FileStorage::default_location()?,
    };
    log::debug!("Using room store at {}", storage.base_path().display());
    Ok(storage)
}

fn print_room(room: &Room) {
    println!("{} walls, {} openings", room.walls.len(), room.openings.len());
    for (i, wall) in room.walls.iter().enumerate() {
        println!(
            "  wall #{i}: ({}, {}) -> ({}, {})  {}",
            wall.start.x,
            wall.start.y,
            wall.end.x,
            wall.end.y,
            format_feet_inches(wall.length())
        );
        for opening in room.openings_on(wall.id()) {
            println!(
                "    {} at {:.2}  {}",
                opening.kind.name(),
                opening.position,
                format_feet_inches(opening.width)
            );
        }
    }
    println!("  total wall length {}", format_feet_inches(room.total_wall_length()));
    if let Some(bounds) = room.bounds() {
        println!(
            "  spans {} x {} from ({}, {})",
            format_feet_inches(bounds.width()),
            format_feet_inches(bounds.height()),
            bounds.x0,
            bounds.y0
        );
    }
}

/// Draw the walls in order, then place openings by wall index.
///
/// A wall that snaps to zero length keeps its index so later openings still
/// line up with the `--wall` arguments; targeting it is an error.
fn draw_room(designer: &mut RoomDesigner<DisplayList>, draw: &DrawArgs) -> Result<(), CliError> {
    let walls: Vec<Option<WallId>> = draw
        .walls
        .iter()
        .map(|&(start, end)| {
            designer.start_wall(start);
            let id = designer.complete_wall(end);
            if id.is_none() {
                log::warn!("Skipped zero-length wall at ({}, {})", start.x, start.y);
            }
            id
        })
        .collect();

    let openings = draw
        .doors
        .iter()
        .map(|o| (o, OpeningKind::Door))
        .chain(draw.windows.iter().map(|o| (o, OpeningKind::Window)));
    for (&(index, position), kind) in openings {
        let wall = walls
            .get(index)
            .copied()
            .ok_or(CliError::NoSuchWall(index, walls.len()))?
            .ok_or(CliError::SkippedWall(index))?;
        designer.add_opening(wall, position, kind);
    }
    Ok(())
}

fn write_svg(designer: &RoomDesigner<DisplayList>, path: &Path) -> Result<(), CliError> {
    fs::write(path, designer.surface().to_svg()).map_err(|source| CliError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    println!("wrote {}", path.display());
    Ok(())
}

fn finish(
    designer: &RoomDesigner<DisplayList>,
    output: &OutputArgs,
    store: Option<PathBuf>,
) -> Result<(), CliError> {
    print_room(designer.room());
    if let Some(path) = &output.svg {
        write_svg(designer, path)?;
    }
    if let Some(name) = &output.save {
        let storage = open_storage(store)?;
        pollster::block_on(storage.save(name, designer.room()))?;
        println!("saved {name}");
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = load_config(cli.config.as_deref())?;
    let new_designer = |config: DesignerConfig| {
        RoomDesigner::new(DisplayList::new(cli.width, cli.height), config)
    };

    match cli.command {
        Command::Preset { kind, output } => {
            let kind: PresetKind = kind.parse()?;
            let mut designer = new_designer(config)?;
            designer.create_preset_room(kind);
            finish(&designer, &output, cli.store)
        }
        Command::Draw(draw) => {
            let mut designer = new_designer(config)?;
            draw_room(&mut designer, &draw)?;
            finish(&designer, &draw.output, cli.store)
        }
        Command::Show { name, svg } => {
            let storage = open_storage(cli.store)?;
            let room = pollster::block_on(storage.load(&name))?;
            let mut designer = new_designer(config)?;
            designer
                .load_room(room)
                .map_err(|source| CliError::Load { name, source })?;
            print_room(designer.room());
            if let Some(path) = svg {
                write_svg(&designer, &path)?;
            }
            Ok(())
        }
        Command::List => {
            let storage = open_storage(cli.store)?;
            for summary in pollster::block_on(storage.list())? {
                println!("{summary}");
            }
            Ok(())
        }
        Command::Delete { name } => {
            let storage = open_storage(cli.store)?;
            if pollster::block_on(storage.delete(&name))? {
                println!("deleted {name}");
            } else {
                println!("no saved room named {name}");
            }
            Ok(())
        }
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
