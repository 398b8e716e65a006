use serde::Serialize;

const TECHNICAL_QUESTION_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterviewQuestion {
    pub category: String,
    pub difficulty: String,
    pub question: String,
}

impl InterviewQuestion {
    fn new(category: &str, difficulty: &str, question: impl Into<String>) -> Self {
        Self {
            category: category.to_string(),
            difficulty: difficulty.to_string(),
            question: question.into(),
        }
    }
}

/// Two behavioural questions, then one design question for each of the first
/// five technical skills (if a resume is known).
pub fn interview_questions(technical_skills: Option<&[String]>) -> Vec<InterviewQuestion> {
    let mut questions = vec![
        InterviewQuestion::new(
            "Behavioral",
            "Medium",
            "Tell me about a time you led a team project.",
        ),
        InterviewQuestion::new(
            "Behavioral",
            "Easy",
            "Describe a challenging problem you solved.",
        ),
    ];

    if let Some(skills) = technical_skills {
        questions.extend(skills.iter().take(TECHNICAL_QUESTION_LIMIT).map(|skill| {
            InterviewQuestion::new(
                "Technical",
                "Hard",
                format!("Explain how you would design a system that uses {skill}."),
            )
        }));
    }
    questions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_questions_only_without_resume() {
        let questions = interview_questions(None);
        assert_eq!(questions.len(), 2);
        assert!(questions.iter().all(|q| q.category == "Behavioral"));
        assert_eq!(questions[1].difficulty, "Easy");
    }

    #[test]
    fn test_technical_questions_capped_at_five() {
        let skills: Vec<String> = ["Python", "SQL", "Docker", "AWS", "Git", "React"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let questions = interview_questions(Some(&skills));
        assert_eq!(questions.len(), 7);
        assert_eq!(
            questions[2].question,
            "Explain how you would design a system that uses Python."
        );
        assert_eq!(questions[6].difficulty, "Hard");
        assert!(!questions.iter().any(|q| q.question.contains("React")));
    }

    #[test]
    fn test_resume_without_technical_skills() {
        assert_eq!(interview_questions(Some(&[])).len(), 2);
    }
}
