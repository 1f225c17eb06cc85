use std::io::{self, BufRead, Write};

use accessnine_core::SalesAgent;

pub const BANNER: &str = "엑세스나인 AI 영업 사원입니다. 무엇을 도와드릴까요? (종료: q)";
pub const PROMPT: &str = "\n질문: ";
pub const THINKING: &str = "생각 중...";

const QUIT_TOKENS: &[&str] = &["q", "quit", "exit"];

pub fn is_quit(line: &str) -> bool {
    let line = line.trim();
    QUIT_TOKENS.iter().any(|t| line.eq_ignore_ascii_case(t))
}

/// Invoke once. The response goes to `out` as pretty JSON; progress and
/// failures go to `err`. A failed invocation is reported, not returned.
pub async fn answer<W: Write, E: Write>(
    agent: &SalesAgent,
    question: &str,
    context: &str,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    writeln!(err, "{THINKING}")?;

    match agent.invoke_parts(question, context).await {
        Ok(response) => {
            let json = serde_json::to_string_pretty(&response).map_err(io::Error::other)?;
            writeln!(out, "{json}")?;
        }
        Err(e) => writeln!(err, "Error generating response: {e}")?,
    }
    Ok(())
}

/// Prompt/answer loop until EOF or a quit token. Blank lines are skipped.
pub async fn run_interactive<R: BufRead, W: Write, E: Write>(
    agent: &SalesAgent,
    context: &str,
    mut input: R,
    out: &mut W,
    err: &mut E,
) -> io::Result<()> {
    writeln!(out, "{BANNER}")?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }

        let question = line.trim_end_matches(['\r', '\n']);
        if is_quit(question) {
            break;
        }
        if question.trim().is_empty() {
            continue;
        }

        answer(agent, question, context, out, err).await?;
        out.flush()?;
    }

    Ok(())
}
