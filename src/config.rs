use anyhow::anyhow;
use clap::Parser;

use crate::algorithm::SearchOptions;

#[derive(Parser, Debug)]
#[command(
    name = "MAPF Segment",
    about = "Constrained single-agent A* with a segmentation heuristic for MAPF.",
    version = "1.0"
)]
pub struct Cli {
    #[arg(
        long,
        help = "Path to the YAML scenario file",
        default_value = "scenario_file/test/test.yaml"
    )]
    pub scenario_path: String,

    #[arg(
        long,
        help = "Path to the output file",
        default_value = "result/result.json"
    )]
    pub output_path: String,

    #[arg(long, help = "Heuristic ceiling for nodes opened by the guided search")]
    pub bound: Option<f64>,

    #[arg(
        long,
        help = "Re-plan every agent guided by the first round of paths",
        default_value_t = false
    )]
    pub guided: bool,

    #[arg(
        long,
        help = "Expansion limit per low level search",
        default_value_t = 100_000
    )]
    pub node_limit: usize,

    #[arg(
        long,
        help = "Generate a random scenario instead of loading one",
        default_value_t = false
    )]
    pub random: bool,

    #[arg(long, help = "Random scenario: grid x dimension", default_value_t = 15)]
    pub dim_x: i32,

    #[arg(long, help = "Random scenario: grid y dimension", default_value_t = 15)]
    pub dim_y: i32,

    #[arg(long, help = "Random scenario: number of agents", default_value_t = 4)]
    pub num_agents: usize,

    #[arg(
        long,
        help = "Random scenario: share of cells turned into obstacles",
        default_value_t = 0.1
    )]
    pub obstacle_ratio: f64,

    #[arg(
        long,
        help = "Seed for the random number generator",
        default_value_t = 0
    )]
    pub seed: u64,

    #[arg(long, help = "Write the generated scenario to this YAML file")]
    pub write_scenario: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub scenario_path: String,
    pub output_path: String,
    pub bound: Option<f64>,
    pub guided: bool,
    pub node_limit: usize,
    pub random: bool,
    pub dimensions: (i32, i32),
    pub num_agents: usize,
    pub obstacle_ratio: f64,
    pub seed: u64,
    pub write_scenario: Option<String>,
}

impl Config {
    pub fn new(cli: &Cli) -> Self {
        Self {
            scenario_path: cli.scenario_path.clone(),
            output_path: cli.output_path.clone(),
            bound: cli.bound,
            guided: cli.guided,
            node_limit: cli.node_limit,
            random: cli.random,
            dimensions: (cli.dim_x, cli.dim_y),
            num_agents: cli.num_agents,
            obstacle_ratio: cli.obstacle_ratio,
            seed: cli.seed,
            write_scenario: cli.write_scenario.clone(),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if let Some(bound) = self.bound {
            if !(bound.is_finite() && bound > 0.0) {
                return Err(anyhow!(
                    "Bound must be a finite number greater than 0, got {}",
                    bound
                ));
            }
        }

        if self.node_limit == 0 {
            return Err(anyhow!("Node limit must be greater than 0"));
        }

        if self.random {
            let (dim_x, dim_y) = self.dimensions;
            if dim_x <= 0 || dim_y <= 0 {
                return Err(anyhow!(
                    "Grid dimensions must be positive, got {}x{}",
                    dim_x,
                    dim_y
                ));
            }
            if self.num_agents == 0 {
                return Err(anyhow!("Random scenario needs at least one agent"));
            }
            if !(0.0..1.0).contains(&self.obstacle_ratio) {
                return Err(anyhow!(
                    "Obstacle ratio must be within [0, 1), got {}",
                    self.obstacle_ratio
                ));
            }
        }
        Ok(())
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            bound: self.bound,
            node_limit: Some(self.node_limit),
        }
    }
}
