//! hashnav - terminal client for hash-based blog navigation.

use anyhow::{Context as _, Result, bail};
use clap::Parser;
use crossterm::{
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind},
    terminal,
};
use hashnav::{
    cli::{Cli, Commands, normalize_hash},
    config::SiteConfig,
    context::Context,
    controller::{Event, Key, NavigationController, RouterState},
    fetch::{DirFetcher, Fetcher, HttpFetcher},
    log,
    logger::{self, newline, truncate_str},
    markup::plain_text,
    mount::MemoryMounter,
    route::{Route, default_resource_url},
    state::NavigationState,
};

/// Length of the content summary printed after each navigation.
const SUMMARY_LEN: usize = 160;

type Controller<'a> = NavigationController<&'a dyn Fetcher, &'a MemoryMounter>;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logger::set_verbose(cli.verbose);
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Resolve { hash } => {
            resolve(&config, hash);
            Ok(())
        }
        Commands::Visit { hash } => visit(&config, hash).await,
        Commands::Posts { context } => list_posts(&config, *context).await,
        Commands::Browse { hash } => browse(&config, hash.as_deref()).await,
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let config = SiteConfig::load(cli)?;
    config.validate(cli.needs_source())?;
    Ok(config)
}

/// Local build directory when configured, the content server otherwise.
fn create_fetcher(config: &SiteConfig) -> Result<Box<dyn Fetcher>> {
    if let Some(root) = &config.site.root {
        let fetcher = DirFetcher::new(root);
        log!(@debug "fetch"; "reading from {}", fetcher.root().display());
        return Ok(Box::new(fetcher));
    }

    let fetcher = HttpFetcher::from_config(config).context("Failed to build HTTP client")?;
    log!(@debug "fetch"; "fetching from {}", fetcher.absolute_url("/"));
    Ok(Box::new(fetcher))
}

// ============================================================================
// Commands
// ============================================================================

fn resolve(config: &SiteConfig, hash: &str) {
    let hash = normalize_hash(hash);
    let route = Route::parse(&hash);
    let context = NavigationState::new().determine_context_from_hash(&hash);
    let prefix = &config.site.prefix;

    println!("route     {route}");
    println!("hash      {}", route.hash());
    println!("resource  {}", route.resource_url(prefix));
    println!("fallback  {}", default_resource_url(prefix));
    if route.is_post() {
        println!("context   inherited (probes {})", probe_order());
    } else {
        println!("context   {context}");
    }
}

async fn visit(config: &SiteConfig, hash: &str) -> Result<()> {
    let fetcher = create_fetcher(config)?;
    let mounter = MemoryMounter::new();
    let mut nav: Controller = NavigationController::new(fetcher.as_ref(), &mounter, config);

    let hash = normalize_hash(hash);
    let state = nav.dispatch(first_event(&hash)).await;
    print_report(&nav);

    if state == RouterState::Error {
        bail!("could not load `{}`", nav.hash());
    }
    Ok(())
}

async fn list_posts(config: &SiteConfig, context: Context) -> Result<()> {
    let fetcher = create_fetcher(config)?;
    let mounter = MemoryMounter::new();
    let mut nav: Controller = NavigationController::new(fetcher.as_ref(), &mounter, config);

    let posts = nav.load_context_posts(context).await;
    let width = posts.len().to_string().len();
    for (i, post) in posts.iter().enumerate() {
        println!("{:>width$}  {}  {}", i + 1, post.path, post.title);
    }

    if !nav.state().is_cached(context) {
        bail!("could not load the `{context}` index");
    }
    Ok(())
}

async fn browse(config: &SiteConfig, start: Option<&str>) -> Result<()> {
    let fetcher = create_fetcher(config)?;
    let mounter = MemoryMounter::new();
    let mut nav: Controller = NavigationController::new(fetcher.as_ref(), &mounter, config);

    let start = start.map(normalize_hash).unwrap_or_default();
    nav.dispatch(first_event(&start)).await;
    print_report(&nav);

    terminal::enable_raw_mode().context("Failed to enter raw mode")?;
    logger::set_raw_mode(true);
    let result = browse_loop(&mut nav).await;
    logger::set_raw_mode(false);
    terminal::disable_raw_mode().context("Failed to leave raw mode")?;
    result
}

/// ←/→ previous/next, b/f back/forward, h home, 1-9 sidebar link, q quit.
async fn browse_loop(nav: &mut Controller<'_>) -> Result<()> {
    loop {
        let input = tokio::task::block_in_place(event::read)?;
        let TermEvent::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = input else {
            continue;
        };

        let event = match code {
            KeyCode::Left => Event::Key(Key::ArrowLeft),
            KeyCode::Right => Event::Key(Key::ArrowRight),
            KeyCode::Char('b') => Event::Back,
            KeyCode::Char('f') => Event::Forward,
            KeyCode::Char('h') => Event::NavClick(Context::All.hash().to_owned()),
            KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
            KeyCode::Char(c) if c.is_ascii_digit() => {
                let index = c.to_digit(10).unwrap_or(0) as usize;
                match index.checked_sub(1).and_then(|i| nav.navbar().links().get(i)) {
                    Some(link) => Event::NavClick(link.hash.clone()),
                    None => continue,
                }
            }
            _ => continue,
        };

        nav.dispatch(event).await;
        print_report(nav);
    }
}

// ============================================================================
// Output
// ============================================================================

/// An empty location starts like a fresh page load.
fn first_event(hash: &str) -> Event {
    if hash.is_empty() {
        Event::Ready
    } else {
        Event::HashChanged(hash.to_owned())
    }
}

fn probe_order() -> String {
    Context::PROBE_ORDER
        .iter()
        .map(|context| context.name())
        .collect::<Vec<_>>()
        .join(" → ")
}

fn print_report(nav: &Controller<'_>) {
    let nl = newline();
    let state = nav.state();
    let mut out = String::new();

    let hash = if nav.hash().is_empty() { "#home" } else { nav.hash() };
    out.push_str(&format!("{nl}hash      {hash} ({:?}){nl}", nav.router_state()));
    out.push_str(&format!(
        "context   {} ({} posts){nl}",
        state.current_context(),
        state.posts().len()
    ));

    let links: Vec<String> = nav
        .navbar()
        .links()
        .iter()
        .enumerate()
        .map(|(i, link)| {
            let active = nav.navbar().active() == Some(link);
            format!("{}{}{}", i + 1, if active { "*" } else { ":" }, link.label)
        })
        .collect();
    out.push_str(&format!("nav       {}{nl}", links.join("  ")));

    if let Some(post) = state.current_post() {
        let position = state.current_post_index().map_or(0, |i| i + 1);
        out.push_str(&format!("post      {position}/{}  {}{nl}", state.posts().len(), post.title));
        if let Some(previous) = state.previous_post() {
            out.push_str(&format!("previous  ← {}{nl}", previous.title));
        }
        if let Some(next) = state.next_post() {
            out.push_str(&format!("next      → {}{nl}", next.title));
        }
    }

    let history = nav.history();
    out.push_str(&format!(
        "history   back:{} forward:{}{nl}",
        if history.can_go_back() { "yes" } else { "no" },
        if history.can_go_forward() { "yes" } else { "no" },
    ));

    if let Some(content) = nav.mounter().content(nav.content_target()) {
        let summary = plain_text(&content);
        out.push_str(&format!("{nl}{}{nl}", truncate_str(&summary, SUMMARY_LEN)));
    }

    print!("{out}");
}
