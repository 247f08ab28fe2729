//! Timed arithmetic challenge answered with a finger count.
//!
//! Equations use small operands and always evaluate to 0-5. A display
//! string is never handed out twice in one session.

use std::collections::HashSet;

use rand::Rng;
use tracing::debug;

use crate::params::Params;
use crate::resources::GameRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Add,
    Sub,
    Mul,
    Div,
}

impl Op {
    const ALL: [Op; 4] = [Op::Add, Op::Sub, Op::Mul, Op::Div];
    const ADDITIVE: [Op; 2] = [Op::Add, Op::Sub];

    fn symbol(self) -> char {
        match self {
            Op::Add => '+',
            Op::Sub => '-',
            Op::Mul => '*',
            Op::Div => '/',
        }
    }

    /// None for division by zero or a non-integer quotient
    fn apply(self, x: i32, y: i32) -> Option<i32> {
        match self {
            Op::Add => Some(x + y),
            Op::Sub => Some(x - y),
            Op::Mul => Some(x * y),
            Op::Div => (y != 0 && x % y == 0).then(|| x / y),
        }
    }

    fn pick(rng: &mut GameRng, ops: &[Op]) -> Op {
        ops[rng.0.gen_range(0..ops.len())]
    }
}

/// Math challenge state
#[derive(Debug, Clone)]
pub struct MathTask {
    pub active: bool,
    pub equation: String,
    pub answer: i32,
    pub started_at: f32,
    pub duration: f32,
    used: HashSet<String>,
}

impl MathTask {
    pub fn new(duration: f32) -> Self {
        Self {
            active: false,
            equation: String::new(),
            answer: 0,
            started_at: 0.0,
            duration,
            used: HashSet::new(),
        }
    }

    /// Forget the current task and every equation used this session
    pub fn reset(&mut self) {
        self.active = false;
        self.equation.clear();
        self.answer = 0;
        self.started_at = 0.0;
        self.used.clear();
    }

    /// Try to start a fresh task. Gives up silently after a bounded number of
    /// attempts, returning false.
    pub fn generate(&mut self, now: f32, rng: &mut GameRng) -> bool {
        for _ in 0..Params::MATH_TASK_MAX_ATTEMPTS {
            let (equation, result) = random_equation(rng);
            if !(0..=Params::MATH_ANSWER_MAX).contains(&result) || self.used.contains(&equation) {
                continue;
            }
            debug!(%equation, answer = result, "math task generated");
            self.used.insert(equation.clone());
            self.equation = equation;
            self.answer = result;
            self.active = true;
            self.started_at = now;
            return true;
        }
        debug!(used = self.used.len(), "math task generation gave up");
        false
    }

    /// Exact match against the stored answer while a task is running
    pub fn check_answer(&self, answer: u8) -> bool {
        self.active && i32::from(answer) == self.answer
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Seconds remaining; negative once expired, zero when inactive
    pub fn time_left(&self, now: f32) -> f32 {
        if !self.active {
            return 0.0;
        }
        self.duration - (now - self.started_at)
    }

    /// Elapsed fraction of the task duration in [0, 1]
    pub fn progress(&self, now: f32) -> f32 {
        if !self.active || self.duration <= 0.0 {
            return 0.0;
        }
        ((now - self.started_at) / self.duration).clamp(0.0, 1.0)
    }

    pub fn used_count(&self) -> usize {
        self.used.len()
    }
}

/// Two operands three times out of five, three operands otherwise
fn random_equation(rng: &mut GameRng) -> (String, i32) {
    if rng.0.gen_range(0..5) < 3 {
        two_operands(rng)
    } else {
        three_operands(rng)
    }
}

fn two_operands(rng: &mut GameRng) -> (String, i32) {
    let mut a = rng.0.gen_range(1..=6);
    let b = rng.0.gen_range(1..=6);
    let op = Op::pick(rng, &Op::ALL);

    if op == Op::Div && a % b != 0 {
        a = b * rng.0.gen_range(1..=3);
    }
    let result = op.apply(a, b).unwrap_or(i32::MAX);
    (format!("{} {} {}", a, op.symbol(), b), result)
}

fn three_operands(rng: &mut GameRng) -> (String, i32) {
    let a = rng.0.gen_range(1..=5);
    let b = rng.0.gen_range(1..=5);
    let c = rng.0.gen_range(1..=4);
    let op1 = Op::pick(rng, &Op::ALL);
    let op2 = Op::pick(rng, &Op::ADDITIVE);

    let result = op1.apply(a, b).and_then(|ab| op2.apply(ab, c));
    match result {
        Some(result) => (
            format!("{} {} {} {} {}", a, op1.symbol(), b, op2.symbol(), c),
            result,
        ),
        None => two_operands(rng),
    }
}

/// Evaluate a displayed equation. The second operator is always additive,
/// so left to right matches the usual precedence.
#[cfg(test)]
fn evaluate(equation: &str) -> Option<i32> {
    let tokens: Vec<&str> = equation.split(' ').collect();
    let num = |s: &str| s.parse::<i32>().ok();
    let op = |s: &str| Op::ALL.into_iter().find(|o| o.symbol().to_string() == s);

    match tokens.as_slice() {
        [a, o, b] => op(o)?.apply(num(a)?, num(b)?),
        [a, o1, b, o2, c] => op(o2)?.apply(op(o1)?.apply(num(a)?, num(b)?)?, num(c)?),
        _ => None,
    }
}
