pub mod export;
pub mod grid;
pub mod pool;

pub use export::write_csv;
pub use grid::{
    load_grid, run_sweep, SweepError, SweepGrid, SweepOutcome, SweepRow, SweepSummary,
};
pub use pool::WorkerPool;
