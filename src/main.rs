use anyhow::Result;
use std::env;

use ecopet::RankTable;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("ranks") => {
            run_ranks();
            Ok(())
        }
        Some(command) => run_backend_command(command, &args[2..]),
        None => {
            print_usage();
            Ok(())
        }
    }
}

/// Offline: the built-in ladder needs no backend
fn run_ranks() {
    let table = RankTable::with_defaults();

    println!("🏅 Rangos Disponibles");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for rank in table.ranks() {
        let icon = rank.icon.as_deref().unwrap_or("·");
        println!("{} {}  ({})", icon, rank.name, rank.range_label());
    }
}

fn print_usage() {
    println!("EcoPet {} - recycling rewards client", ecopet::VERSION);
    println!();
    println!("Usage: ecopet <command>");
    println!();
    println!("Commands:");
    println!("  ranks                      Show the rank ladder");
    println!("  status <user_id>           Current rank, progress and balance");
    println!("  tasks                      Available eco-tasks");
    println!("  rewards <user_id>          Reward catalog with affordability");
    println!("  redeem <user_id> <reward>  Claim a reward");
    println!("  qr <user_id> <code>        Exchange a container QR code");
    println!();
    println!("Set ECOPET_API_URL to target a non-production backend.");
}

#[cfg(feature = "client")]
fn run_backend_command(command: &str, rest: &[String]) -> Result<()> {
    use ecopet::ApiClient;

    let client = match env::var("ECOPET_API_URL") {
        Ok(url) => ApiClient::new(url),
        Err(_) => ApiClient::production(),
    };

    match command {
        "status" => run_status(&client, parse_id(rest, 0, "user_id")?),
        "tasks" => run_tasks(&client),
        "rewards" => run_rewards(&client, parse_id(rest, 0, "user_id")?),
        "redeem" => run_redeem(
            &client,
            parse_id(rest, 0, "user_id")?,
            parse_id(rest, 1, "reward_id")?,
        ),
        "qr" => {
            let user_id = parse_id(rest, 0, "user_id")?;
            let code = rest
                .get(1)
                .ok_or_else(|| anyhow::anyhow!("Missing argument: code"))?;
            run_qr(&client, user_id, code)
        }
        unknown => {
            eprintln!("❌ Unknown command: {}\n", unknown);
            print_usage();
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "client"))]
fn run_backend_command(_command: &str, _rest: &[String]) -> Result<()> {
    eprintln!("❌ Backend commands not available!");
    eprintln!("   Rebuild with: cargo build --features client");
    eprintln!("   Only 'ranks' works offline.");
    std::process::exit(1);
}

#[cfg(feature = "client")]
fn parse_id(rest: &[String], index: usize, name: &str) -> Result<u32> {
    use anyhow::Context;

    let value = rest
        .get(index)
        .ok_or_else(|| anyhow::anyhow!("Missing argument: {}", name))?;

    value
        .parse()
        .with_context(|| format!("Invalid {}: {}", name, value))
}

#[cfg(feature = "client")]
fn run_status(client: &ecopet::ApiClient, user_id: u32) -> Result<()> {
    let user = client.fetch_user(user_id)?;
    let table = RankTable::with_defaults();
    let status = table.status(user.points_total);

    println!("Puntos TTY");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let icon = status.rank.icon.as_deref().unwrap_or("·");
    println!("{} {}  ({})", icon, status.rank.name, status.rank.range_label());

    if let (Some(next), Some(to_next)) = (&status.next_rank, status.points_to_next) {
        println!("{} puntos para alcanzar {}", to_next, next.name);
    } else {
        println!("Rango máximo alcanzado 🎉");
    }

    println!(
        "{} {:.0}%",
        progress_bar(status.progress),
        status.progress * 100.0
    );
    println!("{} pts", user.points_total);

    Ok(())
}

#[cfg(feature = "client")]
fn progress_bar(progress: f64) -> String {
    let filled = (progress * 20.0).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(20 - filled))
}

#[cfg(feature = "client")]
fn run_tasks(client: &ecopet::ApiClient) -> Result<()> {
    use ecopet::TaskBoard;

    let board = TaskBoard::from_tasks(client.fetch_tasks()?);

    println!("📋 Tareas para obtener puntos");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if board.is_empty() {
        println!("No hay tareas disponibles.");
        return Ok(());
    }

    for task in board.pending() {
        println!("  {}  +{} pts", task.description, task.points);
    }

    let completed = board.completed();
    if !completed.is_empty() {
        println!();
        println!("✅ Completadas ({} pts ganados):", board.points_earned());
        for task in completed {
            println!("  {}  +{} pts", task.description, task.points);
        }
    }

    Ok(())
}

#[cfg(feature = "client")]
fn run_rewards(client: &ecopet::ApiClient, user_id: u32) -> Result<()> {
    use ecopet::RewardCatalog;

    let user = client.fetch_user(user_id)?;
    let catalog = RewardCatalog::from_rewards(client.fetch_rewards()?);

    println!("🎁 Recompensas disponibles  (saldo: {} pts)", user.points_total);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    if catalog.is_empty() {
        println!("No hay recompensas disponibles.");
        return Ok(());
    }

    for reward in catalog.rewards() {
        let marker = if reward.is_affordable(user.points_total) {
            "✓"
        } else {
            "✗"
        };
        println!("{} [{}] {}  {} pts", marker, reward.id, reward.name, reward.cost);
    }

    Ok(())
}

#[cfg(feature = "client")]
fn run_redeem(client: &ecopet::ApiClient, user_id: u32, reward_id: u32) -> Result<()> {
    use ecopet::{RedeemStatus, RewardCatalog};

    let user = client.fetch_user(user_id)?;
    let catalog = RewardCatalog::from_rewards(client.fetch_rewards()?);

    let reward = catalog
        .find_by_id(reward_id)
        .ok_or_else(|| anyhow::anyhow!("Reward {} not found in the catalog", reward_id))?;

    match client.redeem_reward(&user, reward)? {
        RedeemStatus::Confirmed(confirmation) => {
            println!("✅ {}", confirmation.message);
            println!("Saldo restante: {} pts", confirmation.new_balance);
        }
        RedeemStatus::Rejected(reason) => {
            println!("❌ {}", reason);
        }
        RedeemStatus::Insufficient(short) => {
            println!(
                "❌ Te faltan {} puntos para canjear {}",
                short.shortfall, reward.name
            );
        }
    }

    Ok(())
}

#[cfg(feature = "client")]
fn run_qr(client: &ecopet::ApiClient, user_id: u32, code: &str) -> Result<()> {
    let message = client.redeem_qr_code(user_id, code)?;
    println!("✅ {}", message);

    Ok(())
}
