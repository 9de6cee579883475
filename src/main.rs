use mapf_segment::algorithm::{a_star_search, segment_paths};
use mapf_segment::common::Path;
use mapf_segment::config::{Cli, Config};
use mapf_segment::scenario::Scenario;
use mapf_segment::stat::Stats;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Serialize)]
struct AgentResult {
    agent: usize,
    name: String,
    success: bool,
    path: Path,
    segment_costs: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct Output {
    guided: bool,
    segments: usize,
    agents: Vec<AgentResult>,
    stats: Stats,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();
    let config = Config::new(&cli);
    config.validate()?;

    let scenario = if config.random {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let (dim_x, dim_y) = config.dimensions;
        let scenario = Scenario::generate_random(
            dim_x,
            dim_y,
            config.num_agents,
            config.obstacle_ratio,
            &mut rng,
        )?;
        if let Some(path) = config.write_scenario.as_ref() {
            scenario.write_to_file(path)?;
        }
        scenario
    } else {
        Scenario::load_from_file(&config.scenario_path)?
    };

    let mut env = scenario
        .environment()
        .with_context(|| "error with scenario grid")?;
    let agents = scenario.agents();
    let options = config.search_options();
    let mut stats = Stats::default();
    let total_solve_start_time = Instant::now();

    // Round 1: every agent plans on its own.
    env.reset_agent();
    let mut paths: Vec<Option<Path>> = Vec::with_capacity(agents.len());
    for agent in &agents {
        let id = env.current_agent();
        let path = a_star_search(
            &env,
            id,
            agent.start_state(),
            &scenario.constraints_for(id),
            &[],
            &options,
            &mut stats,
        );
        if path.is_none() {
            warn!("agent {id} has no path under its constraints");
        }
        paths.push(path);
        env.select_next_agent();
    }

    // Round 2: re-plan against everyone's round 1 paths.
    if config.guided {
        let reference: Vec<Path> = paths
            .iter()
            .map(|path| path.clone().unwrap_or_default())
            .collect();
        for agent in &agents {
            let id = env.current_agent();
            match a_star_search(
                &env,
                id,
                agent.start_state(),
                &scenario.constraints_for(id),
                &reference,
                &options,
                &mut stats,
            ) {
                Some(path) => paths[id] = Some(path),
                None => info!("guided search for agent {id} failed, keep round 1 path"),
            }
            env.select_next_agent();
        }
    }

    stats.time_us = total_solve_start_time.elapsed().as_micros() as usize;
    stats.print();

    let solution: Vec<Path> = paths
        .iter()
        .map(|path| path.clone().unwrap_or_default())
        .collect();
    let first = solution.first().map_or(&[][..], |path| path.as_slice());
    let segmentation = segment_paths(0, first, &solution);
    info!("solution has {} segments", segmentation.count);

    let output = Output {
        guided: config.guided,
        segments: segmentation.count,
        agents: agents
            .iter()
            .zip(paths)
            .zip(segmentation.costs)
            .map(|((agent, path), segment_costs)| AgentResult {
                agent: agent.id,
                name: scenario.agents[agent.id].name.clone(),
                success: path.is_some(),
                path: path.unwrap_or_default(),
                segment_costs,
            })
            .collect(),
        stats,
    };

    if let Some(parent) = std::path::Path::new(&config.output_path).parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(&config.output_path)
        .with_context(|| format!("failed to create output {}", config.output_path))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &output)?;
    info!("write result to {}", config.output_path);

    Ok(())
}
