//! Static description of the algorithm

use serde::Serialize;

/// Descriptive metadata about Simon's algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlgorithmInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub complexity: &'static str,
    pub inventor: &'static str,
    pub year: u16,
    pub problem: &'static str,
    pub classical_difficulty: &'static str,
    pub quantum_advantage: &'static str,
    pub key_concepts: &'static [&'static str],
    pub historical_importance: &'static [&'static str],
    pub procedure: &'static [&'static str],
}

static SIMON: AlgorithmInfo = AlgorithmInfo {
    name: "Simon's Algorithm",
    description: "Finds the hidden period of a two-to-one function with an exponential quantum speedup",
    complexity: "O(n) quantum queries vs classical O(2^(n/2))",
    inventor: "Daniel Simon",
    year: 1994,
    problem: "Given f: {0,1}^n → {0,1}^n with f(x) = f(x ⊕ s), find the period s",
    classical_difficulty: "Any classical algorithm needs exponentially many queries to find s",
    quantum_advantage: "Quantum Fourier sampling yields one linear constraint on s per query",
    key_concepts: &[
        "Period finding",
        "Linear algebra over GF(2)",
        "Quantum Fourier sampling",
        "Hidden subgroup problem",
    ],
    historical_importance: &[
        "Precursor to Shor's algorithm",
        "First exponential oracle separation for a structured problem",
        "Motivated the quantum Fourier transform",
    ],
    procedure: &[
        "Apply Hadamard gates to the input register",
        "Apply the oracle U_f",
        "Apply Hadamard gates to the input register again",
        "Measure the input register to obtain y with y·s = 0",
        "Repeat until n-1 independent equations are known, then solve over GF(2)",
    ],
};

/// Metadata about the algorithm; pure data, no computation
pub fn describe() -> &'static AlgorithmInfo {
    &SIMON
}
