use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Phase {
    pub phase: String,
    pub skills: Vec<String>,
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Roadmap {
    pub phases: Vec<Phase>,
}

fn phase(name: &str, skills: &[&str], projects: &[&str]) -> Phase {
    Phase {
        phase: name.to_string(),
        skills: skills.iter().map(|s| s.to_string()).collect(),
        projects: projects.iter().map(|p| p.to_string()).collect(),
    }
}

/// Generic three-phase plan used when no resume has been uploaded.
pub fn default_roadmap() -> Roadmap {
    Roadmap {
        phases: vec![
            phase(
                "Foundation",
                &["Programming basics", "Version control"],
                &["Build a simple app"],
            ),
            phase(
                "Intermediate",
                &["Web development", "APIs"],
                &["Deploy a REST API"],
            ),
            phase(
                "Advanced",
                &["System design", "Cloud"],
                &["Design a scalable system"],
            ),
        ],
    }
}

/// Spreads the candidate's technical skills over the phases (3 / 3 / 4),
/// with placeholders for any phase left empty.
pub fn roadmap_for(technical_skills: &[String]) -> Roadmap {
    let slice = |from: usize, to: usize, fallback: &[&str]| -> Vec<String> {
        let end = to.min(technical_skills.len());
        match technical_skills.get(from..end) {
            Some(skills) if !skills.is_empty() => skills.to_vec(),
            _ => fallback.iter().map(|s| s.to_string()).collect(),
        }
    };

    Roadmap {
        phases: vec![
            Phase {
                phase: "Foundation".to_string(),
                skills: slice(0, 3, &["Programming basics"]),
                projects: vec!["Complete beginner projects".to_string()],
            },
            Phase {
                phase: "Intermediate".to_string(),
                skills: slice(3, 6, &["Build full-stack app"]),
                projects: vec!["Contribute to an open-source project".to_string()],
            },
            Phase {
                phase: "Advanced".to_string(),
                skills: slice(6, 10, &["System design", "Scaling"]),
                projects: vec!["Design a production system".to_string()],
            },
        ],
    }
}
