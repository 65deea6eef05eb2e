use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use sqlx::SqlitePool;

mod cli;
mod databases;
mod routes;
mod services;

use cli::{Cli, Command};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();
    let pool = databases::connect(&cli.database_url).await?;

    match cli.command {
        Command::Serve { host, port } => serve(pool, host, port).await?,
        Command::Initdb { drop, yes } => initdb(&pool, drop, yes).await?,
        Command::Forge { count } => services::forge::run(&pool, count).await?,
    }

    Ok(())
}

async fn serve(pool: SqlitePool, host: String, port: u16) -> anyhow::Result<()> {
    databases::ensure_schema(&pool).await?;

    log::info!("listening on {}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .configure(routes::message::init)
    })
    .bind((host.as_str(), port))
    .with_context(|| format!("Failed to bind {}:{}", host, port))?
    .run()
    .await
    .context("HTTP server terminated")?;

    Ok(())
}

async fn initdb(pool: &SqlitePool, drop: bool, yes: bool) -> anyhow::Result<()> {
    if drop {
        let confirmed = yes
            || cli::confirm("This operation will delete the database, do you want to continue?")?;
        if !confirmed {
            println!("Aborted.");
            return Ok(());
        }
        databases::drop_all(pool).await?;
        println!("Dropped database.");
    }

    databases::create_all(pool).await?;
    println!("Initialized database.");
    Ok(())
}
