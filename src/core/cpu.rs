use crate::common::{DataMemory, RegisterFile, SimError};
use crate::config::Config;
use crate::core::latency::{FixedLatency, LatencyGenerator, RandomLatency};
use crate::core::pipeline::StageLatch;
use crate::core::stages::{decode_stage, execute_stage, fetch_stage, memory_stage, wb_stage};
use crate::isa::Instruction;
use crate::stats::{SimStats, SimSummary};

/// Simulator state for the five-stage in-order pipeline.
///
/// Owns the architectural state (register file, data memory, program
/// counter), the four inter-stage latches, the control flags, and the
/// statistics counters. `stall` (decode-caused freeze) and `memory_stall`
/// (memory-latency freeze) are independent and must never be conflated;
/// either one freezes fetch, decode and execute.
pub struct Cpu {
    pub regs: RegisterFile,
    pub mem: DataMemory,
    pub program: Vec<Instruction>,
    pub pc: usize,
    pub trace: bool,

    pub if_id: StageLatch,
    pub id_ex: StageLatch,
    pub ex_mem: StageLatch,
    pub mem_wb: StageLatch,

    /// Decode-caused freeze (load-use hazard).
    pub stall: bool,
    /// Memory-latency freeze (pending load/store access).
    pub memory_stall: bool,
    /// A branch resolved and its delay slot is in flight.
    pub branch_delay_active: bool,
    /// Resolved branch target awaiting application.
    pub branch_target: Option<usize>,

    pub stats: SimStats,
    pub latency: Box<dyn LatencyGenerator>,
    pub cycle_limit: u64,
}

impl Cpu {
    /// Builds a simulator for `program` under `config`.
    ///
    /// The memory latency model is selected from the configuration, and
    /// data memory is seeded with any configured preload pairs.
    pub fn new(program: Vec<Instruction>, config: &Config) -> Self {
        let latency: Box<dyn LatencyGenerator> = match config.memory.latency_model.as_str() {
            "Fixed" => Box::new(FixedLatency::new(config.memory.fixed_latency)),
            _ => Box::new(RandomLatency::new(
                config.memory.min_latency,
                config.memory.max_latency,
            )),
        };

        let mut mem = DataMemory::new();
        for pair in &config.memory.preload {
            mem.store(pair[0], pair[1]);
        }

        Self {
            regs: RegisterFile::new(),
            mem,
            program,
            pc: 0,
            trace: config.general.trace_pipeline,
            if_id: StageLatch::default(),
            id_ex: StageLatch::default(),
            ex_mem: StageLatch::default(),
            mem_wb: StageLatch::default(),
            stall: false,
            memory_stall: false,
            branch_delay_active: false,
            branch_target: None,
            stats: SimStats::default(),
            latency,
            cycle_limit: config.pipeline.cycle_limit,
        }
    }

    /// Advances the pipeline by one cycle.
    ///
    /// Stages run in writeback, memory, execute, decode, fetch order so
    /// each consumes latch values finalized in the previous cycle, then any
    /// pending branch redirect is applied.
    pub fn tick(&mut self) -> Result<(), SimError> {
        if self.trace {
            eprintln!("C{:<4} {}", self.stats.cycles, self.occupancy());
        }
        if self.stall || self.memory_stall {
            self.stats.stall_count += 1;
        }

        wb_stage(self)?;
        memory_stage(self);
        execute_stage(self);
        decode_stage(self)?;
        fetch_stage(self);

        self.apply_branch_redirect();
        self.stats.cycles += 1;
        Ok(())
    }

    /// Runs until the program is exhausted and the pipeline drains.
    ///
    /// One fetch is performed before the main loop so the first instruction
    /// enters the pipeline at cycle 0. Exceeding the cycle ceiling aborts
    /// with a non-convergence error instead of looping forever.
    pub fn run(&mut self) -> Result<SimSummary, SimError> {
        if !self.program.is_empty() {
            fetch_stage(self);
            self.stats.cycles = 1;
        }

        while self.pc < self.program.len() || self.any_latch_valid() {
            if self.stats.cycles > self.cycle_limit {
                return Err(SimError::CycleLimitExceeded {
                    limit: self.cycle_limit,
                    cycles: self.stats.cycles,
                    occupancy: self.occupancy(),
                });
            }
            self.tick()?;
        }

        Ok(self.stats.summary())
    }

    /// Applies a resolved branch one full cycle after resolution.
    ///
    /// The cycle in which the branch resolves only marks the delay slot as
    /// in flight; on the following advancing cycle the program counter is
    /// redirected and the fetch latch invalidated, discarding whatever was
    /// mis-fetched beyond the slot. The slot itself is never squashed.
    /// Frozen cycles are skipped: the slot has not moved.
    fn apply_branch_redirect(&mut self) {
        if self.stall || self.memory_stall {
            return;
        }

        if self.branch_delay_active {
            self.stats.branch_delay_total += 1;
            // The slot always completes in this design.
            self.stats.branch_delay_effective += 1;
            if let Some(target) = self.branch_target.take() {
                self.pc = target;
                self.if_id.clear();
                if self.trace {
                    eprintln!("..  branch applied, pc={}", target);
                }
            }
            self.branch_delay_active = false;
        } else if self.branch_target.is_some() {
            self.branch_delay_active = true;
        }
    }

    fn any_latch_valid(&self) -> bool {
        self.if_id.valid || self.id_ex.valid || self.ex_mem.valid || self.mem_wb.valid
    }

    /// One-line snapshot of what each stage is working on this cycle.
    ///
    /// Feeds the per-cycle trace and the non-convergence diagnostic.
    pub fn occupancy(&self) -> String {
        let occupant = |latch: &StageLatch| -> String {
            match latch.occupant() {
                Some(inst) => inst.to_string(),
                None => "-".to_string(),
            }
        };
        let fetching = if !(self.stall || self.memory_stall) && self.pc < self.program.len() {
            self.program[self.pc].to_string()
        } else {
            "-".to_string()
        };
        format!(
            "IF[{}] ID[{}] EX[{}] MEM[{}] WB[{}]",
            fetching,
            occupant(&self.if_id),
            occupant(&self.id_ex),
            occupant(&self.ex_mem),
            occupant(&self.mem_wb),
        )
    }
}
