// 📋 Eco-Task Entity - point-earning recycling activities
// Task completion and points aggregation happen server-side; the board
// only partitions what one fetch returned.

use serde::{Deserialize, Serialize};

// ============================================================================
// ECO TASK
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoTask {
    pub id: u32,
    /// Activity description (e.g. "Depositar una botella de PET en el
    /// contenedor inteligente")
    pub description: String,
    /// Points awarded on completion
    pub points: u32,
    pub completed: bool,
}

impl EcoTask {
    pub fn new(id: u32, description: &str, points: u32) -> Self {
        EcoTask {
            id,
            description: description.to_string(),
            points,
            completed: false,
        }
    }
}

// ============================================================================
// TASK BOARD
// ============================================================================

/// One fetch of the task list, split into pending and completed views
#[derive(Debug, Clone, Default)]
pub struct TaskBoard {
    tasks: Vec<EcoTask>,
}

impl TaskBoard {
    pub fn from_tasks(tasks: Vec<EcoTask>) -> Self {
        TaskBoard { tasks }
    }

    pub fn tasks(&self) -> &[EcoTask] {
        &self.tasks
    }

    /// Tasks still available to earn points from
    pub fn pending(&self) -> Vec<&EcoTask> {
        self.tasks.iter().filter(|task| !task.completed).collect()
    }

    pub fn completed(&self) -> Vec<&EcoTask> {
        self.tasks.iter().filter(|task| task.completed).collect()
    }

    /// Points still earnable from pending tasks
    pub fn points_available(&self) -> u32 {
        self.pending().iter().map(|task| task.points).sum()
    }

    /// Points already earned from completed tasks
    pub fn points_earned(&self) -> u32 {
        self.completed().iter().map(|task| task.points).sum()
    }

    pub fn count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
