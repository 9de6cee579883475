use anyhow::{anyhow, ensure, Context, Result};
use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing::info;

use crate::common::{Agent, Constraint, Location};
use crate::map::Environment;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentYaml {
    pub name: String,
    pub start: [i32; 2],
    pub goal: [i32; 2],
}

/// A planning problem: the grid, one start and goal per agent, and
/// optionally constraints that are already known before planning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub dimensions: [i32; 2],
    #[serde(default)]
    pub obstacles: Vec<[i32; 2]>,
    pub agents: Vec<AgentYaml>,
    #[serde(default)]
    pub constraints: Vec<Constraint>,
}

impl Scenario {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("failed to open scenario {path}"))?;
        let reader = BufReader::new(file);
        let scenario: Scenario = serde_yaml::from_reader(reader)
            .with_context(|| format!("failed to parse scenario {path}"))?;
        info!(
            "Load scenario {path}: {}x{} grid, {} agents",
            scenario.dimensions[0],
            scenario.dimensions[1],
            scenario.agents.len()
        );
        Ok(scenario)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn write_to_file(&self, path: &str) -> Result<()> {
        let file = File::create(path).with_context(|| format!("failed to create {path}"))?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }

    pub fn agents(&self) -> Vec<Agent> {
        self.agents
            .iter()
            .enumerate()
            .map(|(id, agent)| Agent {
                id,
                start: Location::new(agent.start[0], agent.start[1]),
                goal: Location::new(agent.goal[0], agent.goal[1]),
            })
            .collect()
    }

    /// Builds the grid and checks that every start is a free cell on it.
    pub fn environment(&self) -> Result<Environment> {
        let obstacles: HashSet<Location> = self
            .obstacles
            .iter()
            .map(|&[x, y]| Location::new(x, y))
            .collect();
        let agents = self.agents();
        let goals = agents.iter().map(|agent| agent.goal).collect();
        let env = Environment::new(self.dimensions[0], self.dimensions[1], obstacles, goals)?;

        for agent in &agents {
            let start = agent.start;
            ensure!(
                (0..=env.dim_x()).contains(&start.x) && (0..=env.dim_y()).contains(&start.y),
                "start {start} of agent {} is outside the grid",
                agent.id
            );
            if env.is_obstacle(&start) {
                return Err(anyhow!("start {start} of agent {} is an obstacle", agent.id));
            }
        }
        Ok(env)
    }

    /// Constraints that apply to `agent`, ready to hand to the planner.
    pub fn constraints_for(&self, agent: usize) -> Vec<Constraint> {
        self.constraints
            .iter()
            .filter(|constraint| constraint.agent() == agent)
            .copied()
            .collect()
    }

    /// Random scenario on a `dimx` x `dimy` grid (inclusive bounds) with
    /// distinct free starts and goals.
    pub fn generate_random<R: Rng + ?Sized>(
        dimx: i32,
        dimy: i32,
        num_agents: usize,
        obstacle_ratio: f64,
        rng: &mut R,
    ) -> Result<Self> {
        let mut cells: Vec<[i32; 2]> = (0..=dimx)
            .flat_map(|x| (0..=dimy).map(move |y| [x, y]))
            .collect();
        let num_obstacles = (cells.len() as f64 * obstacle_ratio) as usize;

        if cells.len() < num_obstacles + 2 * num_agents {
            return Err(anyhow!(
                "Not enough free cells for {num_agents} agents with {num_obstacles} obstacles"
            ));
        }

        // Shuffle the cells to randomize obstacles, starts and goals at once
        cells.shuffle(rng);
        let mut cells = cells.into_iter();

        let obstacles: Vec<[i32; 2]> = cells.by_ref().take(num_obstacles).collect();
        let agents = (0..num_agents)
            .map(|id| -> Result<AgentYaml> {
                let start = cells.next().ok_or_else(|| anyhow!("Ran out of cells"))?;
                let goal = cells.next().ok_or_else(|| anyhow!("Ran out of cells"))?;
                Ok(AgentYaml {
                    name: format!("agent{id}"),
                    start,
                    goal,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!("Generate scen: {agents:?}");
        Ok(Scenario {
            dimensions: [dimx, dimy],
            obstacles,
            agents,
            constraints: Vec::new(),
        })
    }
}
