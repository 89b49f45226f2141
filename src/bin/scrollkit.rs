use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use scrollkit::{
    AnimationName, DocumentStore as _, Ease, ElementId, Experience, HeadlessPlatform, MemoryStore,
    Millis, MotionConfig, ParallaxConfig, ParallaxDirection, Project, Rect, Record,
    RecordStoreExt as _, RevealConfig, SequencePolicy, Skill, Stage, StageUpdate, Testimonial,
    Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "scrollkit", version)]
struct Cli {
    /// Raise log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve an animation name into its initial/animated styles.
    Style(StyleArgs),
    /// Compute a parallax transform for one element box.
    Parallax(ParallaxArgs),
    /// Report the active section for a scroll position.
    Spy(SpyArgs),
    /// Print stagger delays (and sequence animations, if given).
    Stagger(StaggerArgs),
    /// Drive a stage through a scripted scroll timeline, printing updates as JSON lines.
    Simulate(SimulateArgs),
    /// Inspect or edit a JSON store snapshot.
    Store(StoreArgs),
}

#[derive(Parser, Debug)]
struct StyleArgs {
    /// Animation name (unknown names fall back to fade).
    name: String,

    /// Report the animated endpoint as current.
    #[arg(long, default_value_t = false)]
    visible: bool,

    /// Sample the transition at this progress in `[0, 1]` instead.
    #[arg(long)]
    progress: Option<f64>,

    /// Easing for `--progress` and the transition.
    #[arg(long, default_value = "out_cubic")]
    ease: String,

    /// Transition duration in milliseconds.
    #[arg(long, default_value_t = 600)]
    duration: u64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionArg {
    Up,
    Down,
    Left,
    Right,
}

impl From<DirectionArg> for ParallaxDirection {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Up => Self::Up,
            DirectionArg::Down => Self::Down,
            DirectionArg::Left => Self::Left,
            DirectionArg::Right => Self::Right,
        }
    }
}

#[derive(Parser, Debug)]
struct ParallaxArgs {
    /// Element top, relative to the viewport.
    #[arg(long, allow_negative_numbers = true)]
    top: f64,

    /// Element height.
    #[arg(long)]
    height: f64,

    /// Viewport height.
    #[arg(long, default_value_t = 800.0)]
    viewport_height: f64,

    /// Travel multiplier.
    #[arg(long, default_value_t = 0.5, allow_negative_numbers = true)]
    speed: f64,

    /// Drift direction.
    #[arg(long, value_enum, default_value = "up")]
    direction: DirectionArg,

    /// Enable scale drift.
    #[arg(long, default_value_t = false)]
    scale: bool,

    /// Enable rotation.
    #[arg(long, default_value_t = false)]
    rotate: bool,

    /// Enable edge fade.
    #[arg(long, default_value_t = false)]
    opacity: bool,

    /// Report the reduced-motion result.
    #[arg(long, default_value_t = false)]
    reduced_motion: bool,
}

#[derive(Parser, Debug)]
struct SpyArgs {
    /// Current scroll offset.
    #[arg(long)]
    scroll_y: f64,

    /// Probe offset below the scroll position.
    #[arg(long, default_value_t = 100.0)]
    offset: f64,

    /// Sections as `id:top`, in navigation order.
    #[arg(required = true)]
    sections: Vec<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Cycle,
    HoldLast,
    Strict,
}

impl From<PolicyArg> for SequencePolicy {
    fn from(p: PolicyArg) -> Self {
        match p {
            PolicyArg::Cycle => Self::Cycle,
            PolicyArg::HoldLast => Self::HoldLast,
            PolicyArg::Strict => Self::Strict,
        }
    }
}

#[derive(Parser, Debug)]
struct StaggerArgs {
    /// Number of children.
    #[arg(long)]
    count: usize,

    /// Delay of the first child, in milliseconds.
    #[arg(long, default_value_t = 0)]
    base: u64,

    /// Delay added per child, in milliseconds.
    #[arg(long, default_value_t = 150)]
    step: u64,

    /// Comma-separated animation names for a sequence.
    #[arg(long, value_delimiter = ',')]
    animations: Vec<String>,

    /// Mismatch handling for `--animations`.
    #[arg(long, value_enum, default_value = "cycle")]
    policy: PolicyArg,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    /// Scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct StoreArgs {
    /// Snapshot file; created on first write.
    #[arg(long)]
    file: PathBuf,

    #[command(subcommand)]
    cmd: StoreCommand,
}

#[derive(Subcommand, Debug)]
enum StoreCommand {
    /// Print a collection in display order, one JSON document per line.
    List {
        /// Collection name.
        collection: String,
    },
    /// Insert a document and print its id.
    Add {
        /// Collection name. Known content collections are validated.
        collection: String,
        /// Document body as a JSON object.
        #[arg(long)]
        json: String,
    },
    /// Delete a document.
    Remove {
        /// Collection name.
        collection: String,
        /// Document id.
        id: String,
    },
}

#[derive(serde::Deserialize, Debug)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum SceneElement {
    Reveal {
        rect: Rect,
        #[serde(default)]
        config: Option<RevealConfig>,
    },
    Parallax {
        rect: Rect,
        #[serde(default)]
        config: ParallaxConfig,
    },
    Section {
        id: String,
        rect: Rect,
    },
}

#[derive(serde::Deserialize, Debug)]
struct SceneStep {
    at: Millis,
    #[serde(default)]
    scroll_y: Option<f64>,
    #[serde(default)]
    viewport: Option<Viewport>,
    #[serde(default)]
    scroll_to_section: Option<String>,
}

#[derive(serde::Deserialize, Debug)]
struct Scene {
    viewport: Viewport,
    document_height: f64,
    #[serde(default)]
    reduced_motion: bool,
    #[serde(default)]
    motion: MotionConfig,
    #[serde(default)]
    elements: Vec<SceneElement>,
    #[serde(default)]
    timeline: Vec<SceneStep>,
}

#[derive(serde::Serialize)]
struct UpdateLine<'a> {
    at: Millis,
    #[serde(flatten)]
    update: &'a StageUpdate,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    match cli.cmd {
        Command::Style(args) => cmd_style(args),
        Command::Parallax(args) => cmd_parallax(args),
        Command::Spy(args) => cmd_spy(args),
        Command::Stagger(args) => cmd_stagger(args),
        Command::Simulate(args) => cmd_simulate(args),
        Command::Store(args) => cmd_store(args),
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    let line = serde_json::to_string(value).context("serialize output")?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{line}").context("write stdout")?;
    Ok(())
}

fn cmd_style(args: StyleArgs) -> anyhow::Result<()> {
    let name = AnimationName::parse_or_fade(&args.name);
    let ease: Ease = args.ease.parse()?;
    let style = scrollkit::resolve_style(name, args.visible);
    let current = match args.progress {
        Some(p) => style.sample(p, ease),
        None => style.current(),
    };
    let transition = scrollkit::Transition {
        duration: Millis(args.duration),
        delay: Millis::ZERO,
        ease,
    };
    print_json(&serde_json::json!({
        "name": name,
        "class": style.class_name(),
        "initial": style.initial.css(),
        "animated": style.animated.css(),
        "current": current.css(),
        "transition": transition.css(),
    }))
}

fn cmd_parallax(args: ParallaxArgs) -> anyhow::Result<()> {
    let config = ParallaxConfig {
        speed: args.speed,
        direction: args.direction.into(),
        scale: args.scale,
        rotate: args.rotate,
        opacity: args.opacity,
    };
    config.validate()?;
    let rect = Rect::new(0.0, args.top, 0.0, args.top + args.height);
    let t = scrollkit::compute_parallax(rect, args.viewport_height, &config, args.reduced_motion);
    print_json(&serde_json::json!({
        "progress": scrollkit::scroll_progress(args.top, args.height, args.viewport_height),
        "transform": t,
        "css": t.transform_css(),
    }))
}

fn parse_section(raw: &str) -> anyhow::Result<(&str, f64)> {
    let (id, top) = raw
        .rsplit_once(':')
        .with_context(|| format!("section '{raw}' is not 'id:top'"))?;
    let top: f64 = top
        .parse()
        .with_context(|| format!("section '{raw}' has a non-numeric top"))?;
    Ok((id, top))
}

fn cmd_spy(args: SpyArgs) -> anyhow::Result<()> {
    let sections = args
        .sections
        .iter()
        .map(|s| parse_section(s))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let active = scrollkit::active_section(sections.into_iter(), args.scroll_y, args.offset);
    print_json(&serde_json::json!({ "active": active }))
}

fn cmd_stagger(args: StaggerArgs) -> anyhow::Result<()> {
    let delays = scrollkit::stagger_delays(args.count, Millis(args.base), Millis(args.step));
    if args.animations.is_empty() {
        return print_json(&delays);
    }
    let names = args
        .animations
        .iter()
        .map(|s| s.trim().parse::<AnimationName>())
        .collect::<Result<Vec<_>, _>>()?;
    let animations = scrollkit::sequence_animations(args.count, &names, args.policy.into())?;
    let rows: Vec<_> = delays
        .iter()
        .zip(&animations)
        .enumerate()
        .map(|(index, (delay, name))| {
            serde_json::json!({ "index": index, "delay": delay, "animation": name })
        })
        .collect();
    print_json(&rows)
}

fn emit(at: Millis, updates: &[StageUpdate]) -> anyhow::Result<()> {
    for update in updates {
        print_json(&UpdateLine { at, update })?;
    }
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let f = std::fs::File::open(&args.in_path)
        .with_context(|| format!("open scene '{}'", args.in_path.display()))?;
    let scene: Scene = serde_json::from_reader(std::io::BufReader::new(f))
        .with_context(|| format!("parse scene '{}'", args.in_path.display()))?;
    scene.motion.validate()?;

    let platform = HeadlessPlatform::new(scene.viewport, scene.document_height)
        .with_reduced_motion(scene.reduced_motion);
    let mut stage = Stage::new(platform, scene.motion);

    let mut mounted: Vec<(ElementId, Rect)> = Vec::with_capacity(scene.elements.len());
    for el in scene.elements {
        let (id, rect) = match el {
            SceneElement::Reveal { rect, config } => {
                let id = match config {
                    Some(c) => stage.mount_reveal(c),
                    None => stage.mount_default_reveal(),
                };
                (id, rect)
            }
            SceneElement::Parallax { rect, config } => (stage.mount_parallax(config)?, rect),
            SceneElement::Section { id, rect } => (stage.mount_section(id)?, rect),
        };
        mounted.push((id, rect));
    }
    for (id, rect) in mounted {
        stage.set_layout(id, rect)?;
    }
    tracing::info!(elements = stage.stats().mounted, "scene mounted");

    for step in scene.timeline {
        // Timers due before this step fire at their own deadline.
        while let Some(deadline) = stage.next_deadline().filter(|d| *d < step.at) {
            let updates = stage.tick(deadline);
            emit(deadline, &updates)?;
        }
        if let Some(vp) = step.viewport {
            stage.platform_mut().viewport = vp;
            stage.on_resize();
        }
        if let Some(y) = step.scroll_y {
            stage.platform_mut().set_scroll_y(y);
            stage.on_scroll();
        }
        if let Some(section) = &step.scroll_to_section {
            let req = stage.scroll_to_section(section)?;
            tracing::info!(section = %section, top = req.top, "scrolled to section");
        }
        let updates = stage.tick(step.at);
        emit(step.at, &updates)?;
    }
    while let Some(deadline) = stage.next_deadline() {
        let updates = stage.tick(deadline);
        emit(deadline, &updates)?;
    }

    let stats = stage.stats();
    tracing::info!(?stats, "simulation finished");
    Ok(())
}

fn add_typed<R: Record>(
    store: &mut MemoryStore,
    body: serde_json::Value,
) -> anyhow::Result<String> {
    let record: R = serde_json::from_value(body)
        .with_context(|| format!("parse {} record", R::COLLECTION))?;
    Ok(store.create_record(&record)?)
}

fn cmd_store(args: StoreArgs) -> anyhow::Result<()> {
    let mut store = if args.file.exists() {
        MemoryStore::load_json(&args.file)?
    } else {
        MemoryStore::new()
    };
    match args.cmd {
        StoreCommand::List { collection } => {
            for doc in store.read_all(&collection, scrollkit::ORDER_FIELD)? {
                print_json(&doc)?;
            }
            return Ok(());
        }
        StoreCommand::Add { collection, json } => {
            let body: serde_json::Value =
                serde_json::from_str(&json).context("parse --json body")?;
            let id = if collection == Project::COLLECTION {
                add_typed::<Project>(&mut store, body)?
            } else if collection == Skill::COLLECTION {
                add_typed::<Skill>(&mut store, body)?
            } else if collection == Experience::COLLECTION {
                add_typed::<Experience>(&mut store, body)?
            } else if collection == Testimonial::COLLECTION {
                add_typed::<Testimonial>(&mut store, body)?
            } else {
                let serde_json::Value::Object(map) = body else {
                    anyhow::bail!("--json body must be a JSON object");
                };
                store.create(&collection, map)?
            };
            println!("{id}");
        }
        StoreCommand::Remove { collection, id } => {
            store.delete(&collection, &id)?;
        }
    }
    store.save_json(&args.file)?;
    Ok(())
}
