//! Simulated compiler engine: classifies source text by substring match and
//! renders one of two canned outputs after a fixed latency. Nothing here
//! parses or compiles anything.

use std::time::Duration;

use anyhow::{Context, Result};
use shared::{
    domain::SessionId,
    protocol::{CompileArtifacts, CompileOutcome, CompileRequest},
};
use tokio::{task::JoinHandle, time::Instant};
use tracing::debug;

pub mod session;

/// Fixed delay between invoking a compile and its completion.
pub const SIMULATED_COMPILE_LATENCY: Duration = Duration::from_millis(1500);

/// Editor contents at session start. Must not contain a failure marker.
pub const SAMPLE_PROGRAM: &str = r#"fn factorial(n: u64) -> u64 {
    if n == 0 {
        1
    } else {
        n * factorial(n - 1)
    }
}

fn main() {
    let n = 5;
    println!("Factorial de {} = {}", n, factorial(n));
}
"#;

const FAILURE_MARKERS: [&str; 2] = ["error", "panic!"];

const RUN_TRANSCRIPT: &str = "\
$ cargo run --quiet

Factorial de 5 = 120

Process finished with exit code 0
";

const DIAGNOSTIC_TRANSCRIPT: &str = "\
error[E0308]: mismatched types
 --> src/main.rs:1:13
  |
1 | fn main() { ... }
  |             ^^^ expected `()`, found an unresolved expression
  |
error: aborting due to previous error

For more information about this error, try `rustc --explain E0308`.
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompileClass {
    Success,
    Failure,
}

/// Case-sensitive literal substring check; the entire "compilation" verdict.
pub fn classify_source(source: &str) -> CompileClass {
    if FAILURE_MARKERS
        .iter()
        .any(|marker| source.contains(marker))
    {
        CompileClass::Failure
    } else {
        CompileClass::Success
    }
}

fn render_assembly_listing(request: &CompileRequest, elapsed: Duration) -> String {
    format!(
        "\
; target: {triple}
; opt-level: {level}
; simulated compile time: {millis} ms

	.section .text
	.globl main
main:
	push rbp
	mov rbp, rsp
	mov edi, 5
	call factorial
	mov rsi, rax
	lea rdi, [rip + .Lfmt]
	xor eax, eax
	call printf
	xor eax, eax
	pop rbp
	ret

factorial:
	mov eax, 1
	cmp edi, 0
	je .Ldone
.Lloop:
	imul eax, edi
	dec edi
	jne .Lloop
.Ldone:
	ret

.Lfmt:
	.asciz \"Factorial de %d = %d\\n\"
",
        triple = request.target_arch.triple(),
        level = request.optimization_level.label(),
        millis = elapsed.as_millis(),
    )
}

/// The whole "compiler": a fixed latency plus canned renderings.
#[derive(Debug, Clone)]
pub struct SimulatedCompiler {
    latency: Duration,
}

impl Default for SimulatedCompiler {
    fn default() -> Self {
        Self::new(SIMULATED_COMPILE_LATENCY)
    }
}

impl SimulatedCompiler {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    /// Pure evaluation of a request into its canned outcome. The elapsed
    /// duration is threaded in by the caller so the renderer stays free of
    /// clock access.
    pub fn evaluate(request: &CompileRequest, elapsed: Duration) -> CompileOutcome {
        let artifacts = match classify_source(&request.source) {
            CompileClass::Failure => CompileArtifacts::Failure {
                diagnostics: DIAGNOSTIC_TRANSCRIPT.to_string(),
            },
            CompileClass::Success => CompileArtifacts::Success {
                run_transcript: RUN_TRANSCRIPT.to_string(),
                assembly_listing: render_assembly_listing(request, elapsed),
            },
        };
        CompileOutcome {
            duration_ms: elapsed.as_millis() as u64,
            artifacts,
        }
    }

    /// Spawns the delayed evaluation on the current tokio runtime. The task
    /// is abortable even though the studio UI never cancels a compile.
    pub fn spawn(&self, session_id: SessionId, request: CompileRequest) -> CompileTask {
        let latency = self.latency;
        let handle = tokio::spawn(async move {
            let started = Instant::now();
            tokio::time::sleep(latency).await;
            let elapsed = started.elapsed();
            debug!(
                session = %session_id.0,
                elapsed_ms = elapsed.as_millis() as u64,
                "simulated compile finished"
            );
            Self::evaluate(&request, elapsed)
        });
        CompileTask { handle }
    }
}

/// Handle to one in-flight simulated compile.
pub struct CompileTask {
    handle: JoinHandle<CompileOutcome>,
}

impl CompileTask {
    pub fn abort(&self) {
        self.handle.abort();
    }

    pub async fn join(self) -> Result<CompileOutcome> {
        self.handle
            .await
            .context("simulated compile task was cancelled or panicked")
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
