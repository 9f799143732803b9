mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use query_compiler::{
    CachedStore, Compiler, Fixture, ReferenceStore, Resolver, SearchSet, TenantId,
    read_fixture_from_file,
};
use query_syntax::{parse_terms, try_tokenize};
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type DynCompiler = Compiler<Box<dyn ReferenceStore>>;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let fixture = match &cli.fixture {
        Some(path) => read_fixture_from_file(path).context("Failed to load fixture")?,
        None => {
            info!("No fixture given, every reference will be dropped");
            Fixture::default()
        }
    };
    let store: Box<dyn ReferenceStore> = if cli.cache {
        Box::new(CachedStore::new(fixture.store()))
    } else {
        Box::new(fixture.store())
    };
    let compiler = Compiler::new(Resolver::new(store).with_tenant(cli.tenant.map(TenantId)));
    let documents = SearchSet::new(&fixture.documents);

    if let Some(query) = &cli.query {
        return search(&compiler, &documents, query, cli.json);
    }

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("Failed to flush stdout")?;
        let mut line = String::new();
        if stdin.read_line(&mut line).context("Failed to read stdin")? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        } else if line == "/bye" {
            break;
        }
        if let Err(e) = search(&compiler, &documents, line, cli.json) {
            eprintln!("Failed to search: {e:?}");
        }
    }

    Ok(())
}

fn search(compiler: &DynCompiler, documents: &SearchSet<'_>, query: &str, json: bool) -> Result<()> {
    if let Err(e) = try_tokenize(query) {
        info!("Recovering query: {e}");
    }
    debug!("{} top-level terms", parse_terms(query).count());

    let hits = compiler.auto_query(documents, query)?;
    // `documents` carries no filters, so anything on `hits` is this query
    match hits.filters().last() {
        Some(predicate) if json => {
            let rendered =
                serde_json::to_string(predicate).context("Failed to encode predicate")?;
            println!("{rendered}");
        }
        Some(predicate) => println!("{predicate}"),
        None => println!("(no filter)"),
    }
    for (i, document) in hits.iter().enumerate() {
        println!("[{i}] #{} {}", document.id, document.content);
    }
    Ok(())
}
