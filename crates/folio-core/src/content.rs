use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{Error, Result};

/// Page sections the front end knows how to render, in page order
pub const KNOWN_SECTIONS: [&str; 5] = ["home", "about", "skills", "projects", "contact"];

/// Everything shown on the page
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portfolio {
    pub profile: Profile,
    /// Navbar entries, in page order
    #[serde(default = "default_nav")]
    pub nav: Vec<NavLink>,
    #[serde(default)]
    pub stats: Vec<Stat>,
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default)]
    pub skills: Vec<SkillCategory>,
    #[serde(default)]
    pub competencies: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    /// Shown before the typewriter text ("I'm a")
    #[serde(default = "default_headline")]
    pub headline: String,
    pub summary: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub links: Vec<Link>,
    /// Phrases the typewriter cycles through
    pub roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub label: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    /// Section id, one of `KNOWN_SECTIONS`
    pub id: String,
    pub label: String,
}

impl NavLink {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

/// Headline number in the hero ("500+ Problems solved")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub value: u32,
    #[serde(default)]
    pub suffix: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub period: String,
    pub title: String,
    pub organization: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    /// Proficiency, 0-100
    pub level: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    #[serde(default)]
    pub repo_url: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

/// Project gallery filter
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    /// Parse a filter name; "all" (any case) selects everything
    pub fn parse(name: &str) -> Self {
        if name.eq_ignore_ascii_case("all") {
            Self::All
        } else {
            Self::Category(name.to_string())
        }
    }

    pub fn matches(&self, project: &Project) -> bool {
        match self {
            Self::All => true,
            Self::Category(category) => project.category.eq_ignore_ascii_case(category),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::All => "All",
            Self::Category(category) => category,
        }
    }

    /// Next filter in `All -> categories... -> All` order
    pub fn next(&self, categories: &[String]) -> Self {
        let next_idx = match self {
            Self::All => 0,
            Self::Category(current) => categories
                .iter()
                .position(|c| c.eq_ignore_ascii_case(current))
                .map(|i| i + 1)
                .unwrap_or(categories.len()),
        };
        categories
            .get(next_idx)
            .map(|c| Self::Category(c.clone()))
            .unwrap_or(Self::All)
    }
}

impl Portfolio {
    /// Load content from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let portfolio = Self::from_toml(&content)?;
        debug!(
            path = %path.display(),
            projects = portfolio.projects.len(),
            "loaded portfolio content"
        );
        Ok(portfolio)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let portfolio: Self =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    /// Load from `path` if given, otherwise the built-in sample content
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.profile.roles.is_empty() || self.profile.roles.iter().any(|r| r.is_empty()) {
            return Err(Error::InvalidConfiguration(
                "profile.roles must list at least one non-empty role".to_string(),
            ));
        }
        for (i, link) in self.nav.iter().enumerate() {
            if !KNOWN_SECTIONS.contains(&link.id.as_str()) {
                return Err(Error::InvalidConfiguration(format!(
                    "nav entry '{}' is not one of {}",
                    link.id,
                    KNOWN_SECTIONS.join(", ")
                )));
            }
            if self.nav[..i].iter().any(|earlier| earlier.id == link.id) {
                return Err(Error::InvalidConfiguration(format!(
                    "nav entry '{}' appears twice",
                    link.id
                )));
            }
        }
        for category in &self.skills {
            if let Some(skill) = category.skills.iter().find(|s| s.level > 100) {
                return Err(Error::InvalidConfiguration(format!(
                    "skill '{}' has level {}, expected 0-100",
                    skill.name, skill.level
                )));
            }
        }
        Ok(())
    }

    /// Distinct project categories in first-seen order
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for project in &self.projects {
            if !categories.iter().any(|c| c.eq_ignore_ascii_case(&project.category)) {
                categories.push(project.category.clone());
            }
        }
        categories
    }

    pub fn filtered_projects<'a>(
        &'a self,
        filter: &'a ProjectFilter,
    ) -> impl Iterator<Item = &'a Project> + 'a {
        self.projects.iter().filter(move |p| filter.matches(p))
    }
}

fn default_headline() -> String {
    "I'm a".to_string()
}

fn default_nav() -> Vec<NavLink> {
    vec![
        NavLink::new("home", "Home"),
        NavLink::new("about", "About"),
        NavLink::new("skills", "Skills"),
        NavLink::new("projects", "Projects"),
        NavLink::new("contact", "Contact"),
    ]
}

fn stat(value: u32, suffix: &str, label: &str) -> Stat {
    Stat {
        value,
        suffix: suffix.to_string(),
        label: label.to_string(),
    }
}

fn skill(name: &str, level: u8) -> Skill {
    Skill {
        name: name.to_string(),
        level,
    }
}

fn project(title: &str, category: &str, description: &str, tags: &[&str]) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        live_url: None,
        repo_url: None,
        featured: false,
    }
}

impl Default for Portfolio {
    fn default() -> Self {
        Self {
            profile: Profile {
                name: "Your Name".to_string(),
                headline: default_headline(),
                summary: "Computer science student building web applications end to end. \
                          I like turning complex problems into simple, intuitive software."
                    .to_string(),
                location: Some("Jaipur, India".to_string()),
                email: Some("you@example.com".to_string()),
                links: vec![Link {
                    label: "GitHub".to_string(),
                    url: "https://github.com/".to_string(),
                }],
                roles: [
                    "Full Stack Developer",
                    "DSA Problem Solver",
                    "MERN Stack Developer",
                    "UI/UX Enthusiast",
                    "Open Source Contributor",
                ]
                .iter()
                .map(|r| r.to_string())
                .collect(),
            },
            nav: default_nav(),
            stats: vec![
                stat(500, "+", "DSA Problems"),
                stat(25, "+", "Projects"),
                stat(10, "+", "Technologies"),
            ],
            timeline: vec![
                TimelineEntry {
                    period: "2024 - 2028".to_string(),
                    title: "B.Tech in Computer Science".to_string(),
                    organization: "University".to_string(),
                    description: "Focus on full stack development and data structures."
                        .to_string(),
                },
                TimelineEntry {
                    period: "2023 - Present".to_string(),
                    title: "DSA Problem Solver".to_string(),
                    organization: "LeetCode, Codeforces".to_string(),
                    description: "Hundreds of problems across competitive programming platforms."
                        .to_string(),
                },
            ],
            skills: vec![
                SkillCategory {
                    name: "Frontend".to_string(),
                    skills: vec![
                        skill("HTML5", 95),
                        skill("CSS3", 90),
                        skill("JavaScript", 88),
                        skill("React", 85),
                    ],
                },
                SkillCategory {
                    name: "Backend".to_string(),
                    skills: vec![
                        skill("Node.js", 82),
                        skill("Express", 80),
                        skill("MongoDB", 78),
                        skill("REST APIs", 85),
                    ],
                },
                SkillCategory {
                    name: "Languages".to_string(),
                    skills: vec![
                        skill("C++", 88),
                        skill("Python", 75),
                        skill("TypeScript", 72),
                        skill("Rust", 60),
                    ],
                },
            ],
            competencies: ["Data Structures", "Algorithms", "API Development", "Version Control"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            projects: vec![
                project(
                    "E-Commerce Platform",
                    "Full Stack",
                    "Product catalog, cart, authentication and order management.",
                    &["React", "Node.js", "MongoDB"],
                ),
                project(
                    "Task Manager",
                    "Frontend",
                    "Collaborative task board with drag and drop and progress tracking.",
                    &["React", "Firebase"],
                ),
                project(
                    "Weather Dashboard",
                    "Frontend",
                    "Forecasts, location search and charts from a public weather API.",
                    &["JavaScript", "Chart.js"],
                ),
                project(
                    "DSA Visualizer",
                    "Tools",
                    "Step-by-step animations of sorting, graph and tree algorithms.",
                    &["JavaScript", "Canvas"],
                ),
            ],
        }
    }
}
