// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::io::BufRead;
use std::io::Write;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::attempt::QuizAnswer;
use crate::types::question_id::QuestionId;
use crate::workspace::Workspace;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    /// The answer was recalled.
    Correct,
    /// The answer was not recalled.
    Incorrect,
}

/// Walk through a topic's quiz: show each question, reveal the answer, and
/// record the user's self-grade. Stops early if the input ends.
pub fn run_quiz(
    ws: &mut Workspace,
    topic_id: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Fallible<()> {
    let topic = match ws.catalog.topic(topic_id) {
        Some(topic) => topic.clone(),
        None => return fail(format!("no topic with id '{topic_id}'.")),
    };
    if topic.quiz.is_empty() {
        writeln!(out, "{} has no quiz questions.", topic.title)?;
        return Ok(());
    }
    let total = topic.quiz.len();
    let mut answered = 0;
    let mut correct = 0;
    for (question_id, q) in topic.questions() {
        writeln!(out, "[{}/{total}] Q: {}", answered + 1, q.question)?;
        writeln!(out, "[press enter to reveal]")?;
        out.flush()?;
        if read_line(input)?.is_none() {
            break;
        }
        writeln!(out, "A: {}", q.answer)?;
        let Some(outcome) = read_outcome(input, out)? else {
            break;
        };
        ws.progress.add_quiz_result(QuizAnswer {
            question_id,
            topic_id: topic.id.clone(),
            question: q.question.clone(),
            correct: outcome == Outcome::Correct,
        });
        answered += 1;
        if outcome == Outcome::Correct {
            correct += 1;
        }
    }
    writeln!(out, "Quiz finished: {correct}/{answered} correct.")?;
    Ok(())
}

/// Record a single attempt without the interactive quiz.
pub fn record_attempt(
    ws: &mut Workspace,
    question_id: &str,
    outcome: Outcome,
    out: &mut impl Write,
) -> Fallible<()> {
    let question_id = QuestionId::new(question_id);
    let answer = match ws.catalog.question(&question_id) {
        Some((topic, q)) => QuizAnswer {
            question_id: question_id.clone(),
            topic_id: topic.id.clone(),
            question: q.question.clone(),
            correct: outcome == Outcome::Correct,
        },
        None if ws.config.strict => {
            return fail(format!("no question with id '{question_id}'."));
        }
        None => {
            let topic_id = question_id
                .parts()
                .map(|(topic_id, _)| topic_id.to_string())
                .unwrap_or_default();
            QuizAnswer {
                question_id: question_id.clone(),
                topic_id,
                question: String::new(),
                correct: outcome == Outcome::Correct,
            }
        }
    };
    let attempt = ws.progress.add_quiz_result(answer);
    writeln!(
        out,
        "Recorded {} as {}.",
        attempt.question_id,
        if attempt.correct {
            "correct"
        } else {
            "incorrect"
        }
    )?;
    Ok(())
}

fn read_line(input: &mut impl BufRead) -> Fallible<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn read_outcome(input: &mut impl BufRead, out: &mut impl Write) -> Fallible<Option<Outcome>> {
    loop {
        writeln!(out, "Did you get it right? [y/n]")?;
        out.flush()?;
        let Some(line) = read_line(input)? else {
            return Ok(None);
        };
        match line.to_lowercase().as_str() {
            "y" | "yes" => return Ok(Some(Outcome::Correct)),
            "n" | "no" => return Ok(Some(Outcome::Incorrect)),
            _ => writeln!(out, "Please answer y or n.")?,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::helper::create_tmp_copy_of_test_directory;
    use crate::types::progress::TopicStats;

    #[test]
    fn test_quiz() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut input = Cursor::new("\nmaybe\nn\n\ny\n");
        let mut out = Vec::new();
        run_quiz(&mut ws, "nodejs", &mut input, &mut out)?;
        let out = String::from_utf8_lossy(&out);
        assert!(out.contains("[1/2] Q: Why does Node.js need an event loop?"));
        assert!(out.contains("Please answer y or n."));
        assert!(out.ends_with("Quiz finished: 1/2 correct.\n"));

        let history = ws.progress.quiz_history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].question_id.as_str(), "nodejs-q-0");
        assert!(!history[0].correct);
        assert_eq!(history[1].question_id.as_str(), "nodejs-q-1");
        assert!(history[1].correct);
        assert_eq!(
            ws.progress.topic_stats("nodejs"),
            TopicStats {
                correct: 1,
                incorrect: 1
            }
        );
        Ok(())
    }

    #[test]
    fn test_quiz_stops_at_end_of_input() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut input = Cursor::new("\ny\n\n");
        let mut out = Vec::new();
        run_quiz(&mut ws, "flexbox", &mut input, &mut out)?;
        assert_eq!(ws.progress.quiz_history().len(), 1);
        assert!(String::from_utf8_lossy(&out).ends_with("Quiz finished: 1/1 correct.\n"));
        Ok(())
    }

    #[test]
    fn test_quiz_unknown_topic() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert!(run_quiz(&mut ws, "cobol", &mut input, &mut out).is_err());
        Ok(())
    }

    #[test]
    fn test_record_attempt() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        record_attempt(&mut ws, "flexbox-q-1", Outcome::Incorrect, &mut out)?;
        assert_eq!(
            String::from_utf8_lossy(&out),
            "Recorded flexbox-q-1 as incorrect.\n"
        );
        let attempt = &ws.progress.quiz_history()[0];
        assert_eq!(attempt.topic_id, "flexbox");
        assert_eq!(attempt.question, "What is the default flex-direction?");
        Ok(())
    }

    #[test]
    fn test_record_unknown_question() -> Fallible<()> {
        let dir = create_tmp_copy_of_test_directory()?;
        let mut ws = Workspace::open(Some(dir.path().display().to_string()))?;
        let mut out = Vec::new();
        assert!(record_attempt(&mut ws, "flexbox-q-9", Outcome::Correct, &mut out).is_err());
        assert!(ws.progress.quiz_history().is_empty());

        ws.config.strict = false;
        record_attempt(&mut ws, "legacy-q-9", Outcome::Correct, &mut out)?;
        record_attempt(&mut ws, "free-form", Outcome::Incorrect, &mut out)?;
        let history = ws.progress.quiz_history();
        assert_eq!(history[0].topic_id, "legacy");
        assert_eq!(history[1].topic_id, "");
        Ok(())
    }
}
