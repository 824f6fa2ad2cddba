//! Simulation statistics collection and reporting.
//!
//! All counters are derived from events emitted by the pipeline stages;
//! nothing here polls simulator state independently.

use serde::Serialize;

/// Performance counters accumulated over a run.
///
/// An instruction counts as completed when it exits writeback
/// (`add`/`sub`/`addi`/`lw`) or when it exits the memory stage without a
/// writeback step (`sw`, `beq`).
#[derive(Debug, Default)]
pub struct SimStats {
    pub cycles: u64,
    pub instructions_completed: u64,

    /// Cycles in which the pipeline front end was frozen by either stall flag.
    pub stall_count: u64,
    /// Bubbles inserted for load-use hazards.
    pub data_hazard_stalls: u64,
    /// Memory-latency hold cycles attributable to loads.
    pub load_stalls: u64,
    /// Total memory-latency hold cycles (loads and stores).
    pub memory_delay_cycles: u64,

    pub branch_delay_total: u64,
    pub branch_delay_effective: u64,
}

impl SimStats {
    /// Cycles per completed instruction, or 0 when nothing completed.
    pub fn cpi(&self) -> f64 {
        if self.instructions_completed == 0 {
            0.0
        } else {
            self.cycles as f64 / self.instructions_completed as f64
        }
    }

    /// Builds the end-of-run summary record.
    pub fn summary(&self) -> SimSummary {
        SimSummary {
            cycles: self.cycles,
            instructions: self.instructions_completed,
            cpi: self.cpi(),
            stall_count: self.stall_count,
            load_stalls: self.load_stalls,
            data_hazard_stalls: self.data_hazard_stalls,
            memory_delay_cycles: self.memory_delay_cycles,
            branch_delay_effective: self.branch_delay_effective,
            branch_delay_total: self.branch_delay_total,
        }
    }

    /// Prints a formatted statistics report to stdout.
    pub fn print(&self) {
        println!("\n==========================================================");
        println!("PIPELINE SIMULATION STATISTICS");
        println!("==========================================================");
        println!("sim_cycles               {}", self.cycles);
        println!("sim_insts                {}", self.instructions_completed);
        println!("sim_cpi                  {:.2}", self.cpi());
        println!("----------------------------------------------------------");
        println!("STALL BREAKDOWN");
        println!("  stalls.frozen_cycles   {}", self.stall_count);
        println!("  stalls.load_use        {}", self.data_hazard_stalls);
        println!("  stalls.load_wait       {}", self.load_stalls);
        println!("  cycles.memory_delay    {}", self.memory_delay_cycles);
        println!("----------------------------------------------------------");
        println!("BRANCH DELAY SLOTS");
        println!("  slots.total            {}", self.branch_delay_total);
        let effectiveness = if self.branch_delay_total > 0 {
            100.0 * self.branch_delay_effective as f64 / self.branch_delay_total as f64
        } else {
            0.0
        };
        println!(
            "  slots.effective        {} ({:.2}%)",
            self.branch_delay_effective, effectiveness
        );
        println!("==========================================================");
    }
}

/// End-of-run summary exposed to reporting collaborators.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    pub cycles: u64,
    pub instructions: u64,
    pub cpi: f64,
    pub stall_count: u64,
    pub load_stalls: u64,
    pub data_hazard_stalls: u64,
    pub memory_delay_cycles: u64,
    pub branch_delay_effective: u64,
    pub branch_delay_total: u64,
}
