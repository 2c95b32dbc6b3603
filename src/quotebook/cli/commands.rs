use super::print::{
    print_config, print_full_quote, print_messages, print_quotes, print_related, print_values,
};
use super::setup::{Cli, Commands, FavCommands};
use clap::Parser;
use quotebook::api::{CmdMessage, CmdResult, ConfigAction, QuotebookApi, QuotebookPaths};
use quotebook::clipboard::copy_to_clipboard;
use quotebook::config::{self, QuotebookConfig};
use quotebook::error::Result;
use quotebook::favorites::FsBackend;
use quotebook::loader::QuoteLibrary;
use quotebook::logging::{init_logging, Verbosity};
use quotebook::model::ALL_CATEGORY;
use quotebook::render::{glyph_source, BlockGlyphs, ExportSize, GlyphSource};
use quotebook::server::{self, AppState};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

struct AppContext {
    api: QuotebookApi<FsBackend>,
    config: QuotebookConfig,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(Verbosity::from_flags(cli.quiet, cli.verbose));
    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::List { search, category }) => handle_list(&ctx, &search, &category),
        Some(Commands::View { id }) => handle_view(&ctx, id),
        Some(Commands::Random) => handle_random(&ctx),
        Some(Commands::Categories) => handle_values(ctx.api.categories()?),
        Some(Commands::Tags) => handle_values(ctx.api.tags()?),
        Some(Commands::Fav { action }) => handle_fav(&ctx, action.unwrap_or(FavCommands::List)),
        Some(Commands::Export {
            id,
            theme,
            preview,
            out,
        }) => handle_export(&ctx, id, theme, preview, out),
        Some(Commands::Copy { id }) => handle_copy(&ctx, id),
        Some(Commands::Serve { bind }) => handle_serve(&ctx, bind),
        Some(Commands::Config { key, value }) => handle_config(&ctx, key, value),
        None => handle_list(&ctx, "", ALL_CATEGORY),
    }
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let data_dir = config::data_dir()?;
    let config = QuotebookConfig::load(&data_dir).unwrap_or_else(|e| {
        tracing::warn!("Ignoring unreadable config: {}", e);
        QuotebookConfig::default()
    });

    let quotes_dir = cli
        .quotes
        .clone()
        .unwrap_or_else(|| config.quotes_dir.clone());
    let library = QuoteLibrary::load(&quotes_dir);

    // Only exports rasterize text; skip reading the font otherwise.
    let glyphs: Arc<dyn GlyphSource> = match cli.command {
        Some(Commands::Export { .. }) => glyph_source(config.font_path.as_deref()),
        _ => Arc::new(BlockGlyphs),
    };

    let paths = QuotebookPaths {
        data_dir: data_dir.clone(),
        quotes_dir,
    };
    let api = QuotebookApi::new(library, FsBackend::new(data_dir), glyphs, paths);
    Ok(AppContext { api, config })
}

fn favorite_ids(ctx: &AppContext) -> HashSet<u32> {
    ctx.api
        .favorites_store()
        .get_all()
        .iter()
        .map(|q| q.id)
        .collect()
}

fn handle_list(ctx: &AppContext, search: &str, category: &str) -> Result<()> {
    let result = ctx.api.list_quotes(search, category)?;
    print_quotes(&result.listed_quotes, &favorite_ids(ctx));
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: u32) -> Result<()> {
    let result = ctx.api.view_quote(id)?;
    let favorites = favorite_ids(ctx);
    for quote in &result.listed_quotes {
        print_full_quote(quote, favorites.contains(&quote.id));
    }
    print_related(&result.related_quotes, &favorites);
    print_messages(&result.messages);
    Ok(())
}

fn handle_random(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.random_quote()?;
    let favorites = favorite_ids(ctx);
    for quote in &result.listed_quotes {
        print_full_quote(quote, favorites.contains(&quote.id));
    }
    Ok(())
}

fn handle_values(result: CmdResult) -> Result<()> {
    print_values(&result.values);
    print_messages(&result.messages);
    Ok(())
}

fn handle_fav(ctx: &AppContext, action: FavCommands) -> Result<()> {
    let result = match action {
        FavCommands::List => {
            let result = ctx.api.list_favorites()?;
            let all: HashSet<u32> = result.listed_quotes.iter().map(|q| q.id).collect();
            print_quotes(&result.listed_quotes, &all);
            print_messages(&result.messages);
            return Ok(());
        }
        FavCommands::Add { id } => ctx.api.add_favorite(id)?,
        FavCommands::Remove { id } => ctx.api.remove_favorite(id)?,
        FavCommands::Toggle { id } => ctx.api.toggle_favorite(id)?,
        FavCommands::Check { id } => ctx.api.check_favorite(id)?,
    };
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(
    ctx: &AppContext,
    id: u32,
    theme: Option<String>,
    preview: bool,
    out: PathBuf,
) -> Result<()> {
    let theme = theme.unwrap_or_else(|| ctx.config.default_theme.clone());
    let size = if preview {
        ExportSize::Preview
    } else {
        ExportSize::Download
    };
    let result = ctx.api.export_quote(id, &theme, size, &out)?;
    print_messages(&result.messages);
    for path in &result.exported_paths {
        println!("{}", path.display());
    }
    Ok(())
}

fn handle_copy(ctx: &AppContext, id: u32) -> Result<()> {
    let text = ctx.api.share_text(id)?;
    let message = match copy_to_clipboard(&text) {
        Ok(()) => CmdMessage::success("Copied to clipboard"),
        Err(e) => {
            println!("{}", text);
            CmdMessage::warning(format!("Could not copy to clipboard: {}", e))
        }
    };
    print_messages(&[message]);
    Ok(())
}

fn handle_serve(ctx: &AppContext, bind: Option<String>) -> Result<()> {
    let addr = bind.unwrap_or_else(|| ctx.config.bind_addr.clone());
    let glyphs = glyph_source(ctx.config.font_path.as_deref());
    let state = AppState::new(ctx.api.paths().quotes_dir.clone(), glyphs)
        .with_default_theme(ctx.config.theme());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server::serve(&addr, Arc::new(state)))
}

fn handle_config(ctx: &AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };
    let result = ctx.api.config(action)?;
    if let Some(config) = &result.config {
        if result.messages.is_empty() {
            print_config(config);
        }
    }
    print_messages(&result.messages);
    Ok(())
}
