//! Course and quiz content.
//!
//! Content lives in code for easy editing, mirroring how the curriculum is
//! authored: each course is a function returning its meta, modules, and
//! quizzes, and [`Catalog::builtin`] stitches them together once at
//! startup. Anonymous attempts against this content are stored per session
//! in Redis; the catalog itself is immutable.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

#[derive(Clone, Debug, Serialize)]
pub struct CourseMeta {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub duration: &'static str,
    pub level: &'static str,
    pub tags: &'static [&'static str],
}

#[derive(Clone, Debug, Serialize)]
pub struct ModuleSection {
    pub title: &'static str,
    pub content: &'static str,
}

#[derive(Clone, Debug, Serialize)]
pub struct Module {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub sections: Vec<ModuleSection>,
}

#[derive(Clone, Debug, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub prompt: &'static str,
    /// Option key (e.g. "a") to label.
    pub options: BTreeMap<&'static str, &'static str>,
    pub correct: &'static str,
    pub help: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct Course {
    pub meta: CourseMeta,
    pub modules: Vec<Module>,
}

/// Card-sized view of a course for the landing page.
#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub slug: &'static str,
    pub title: &'static str,
    pub summary: &'static str,
    pub duration: &'static str,
    pub level: &'static str,
    pub tags: &'static [&'static str],
    pub modules: usize,
}

/// Storage key for everything scoped to a module within a course.
pub fn module_key(course_slug: &str, module_slug: &str) -> String {
    format!("{course_slug}:{module_slug}")
}

pub struct Catalog {
    courses: Vec<Course>,
    quizzes: HashMap<String, Vec<QuizQuestion>>,
}

impl Catalog {
    pub fn builtin() -> Self {
        let mut quizzes = HashMap::new();
        quizzes.insert(
            module_key("ai-foundations", "introduction"),
            intro_quiz(),
        );
        quizzes.insert(module_key("ai-foundations", "ai-eras"), eras_quiz());

        Self {
            courses: vec![ai_foundations(), ai_applied()],
            quizzes,
        }
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn course(&self, slug: &str) -> Option<&Course> {
        self.courses.iter().find(|course| course.meta.slug == slug)
    }

    pub fn module(&self, course_slug: &str, module_slug: &str) -> Option<&Module> {
        self.course(course_slug)?
            .modules
            .iter()
            .find(|module| module.slug == module_slug)
    }

    /// The module after `module_slug` in course order, if any.
    pub fn next_module(&self, course_slug: &str, module_slug: &str) -> Option<&Module> {
        let modules = &self.course(course_slug)?.modules;
        let position = modules.iter().position(|module| module.slug == module_slug)?;

        modules.get(position + 1)
    }

    pub fn quiz(&self, course_slug: &str, module_slug: &str) -> &[QuizQuestion] {
        self.quizzes
            .get(&module_key(course_slug, module_slug))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn question(
        &self,
        course_slug: &str,
        module_slug: &str,
        question_id: &str,
    ) -> Option<&QuizQuestion> {
        self.quiz(course_slug, module_slug)
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn summaries(&self) -> Vec<CourseSummary> {
        self.courses
            .iter()
            .map(|course| CourseSummary {
                slug: course.meta.slug,
                title: course.meta.title,
                summary: course.meta.summary,
                duration: course.meta.duration,
                level: course.meta.level,
                tags: course.meta.tags,
                modules: course.modules.len(),
            })
            .collect()
    }
}

fn ai_foundations() -> Course {
    Course {
        meta: CourseMeta {
            slug: "ai-foundations",
            title: "AI Foundations",
            summary: "An overview of AI, how it works, and where it can help day to day work at a transit agency.",
            duration: "~30 minutes",
            level: "Beginner",
            tags: &["ai", "basics"],
        },
        modules: vec![
            Module {
                slug: "introduction",
                title: "Welcome to AI Foundations",
                summary: "What this course covers and how to get the most out of it.",
                sections: vec![
                    ModuleSection {
                        title: "Objectives",
                        content: "Spot everyday opportunities where AI saves time, apply simple \
                                  patterns like summarize, draft, and rewrite, and use approved \
                                  tools safely: avoid PII, review important facts, keep humans in \
                                  the loop.",
                    },
                    ModuleSection {
                        title: "Agenda",
                        content: "Quick examples, transit-flavored use cases, guardrails and \
                                  better prompts, then a try-it checklist.",
                    },
                ],
            },
            Module {
                slug: "ai-eras",
                title: "The Eras of AI",
                summary: "From rules-based systems through foundational models to the agentic era.",
                sections: vec![
                    ModuleSection {
                        title: "Three waves",
                        content: "Rules and classic machine learning came first, then large \
                                  foundational models, and most recently agentic systems that can \
                                  plan and take actions.",
                    },
                ],
            },
            Module {
                slug: "everyday-ai",
                title: "Everyday AI",
                summary: "Small, safe wins: emails, summaries, and first drafts.",
                sections: vec![
                    ModuleSection {
                        title: "Where to start",
                        content: "Start with low-stakes text work. Summarize a long thread, draft \
                                  a rider notice, or rewrite a procedure in plain language, then \
                                  review before sending.",
                    },
                ],
            },
        ],
    }
}

fn ai_applied() -> Course {
    Course {
        meta: CourseMeta {
            slug: "ai-applied",
            title: "Applied AI for Transit",
            summary: "Hands-on prompting patterns and the guardrails that keep agency work safe.",
            duration: "~25 minutes",
            level: "Intermediate",
            tags: &["ai", "prompting", "guardrails"],
        },
        modules: vec![
            Module {
                slug: "prompting-patterns",
                title: "Prompting Patterns",
                summary: "Summarize, draft, and transform with clear instructions.",
                sections: vec![
                    ModuleSection {
                        title: "The three patterns",
                        content: "Most wins come from three shapes: summarize this, draft that, \
                                  or transform one format into another. Say who the audience is \
                                  and what good output looks like.",
                    },
                ],
            },
            Module {
                slug: "guardrails",
                title: "Guardrails",
                summary: "What never goes into a prompt, and when a human must review.",
                sections: vec![
                    ModuleSection {
                        title: "Hard rules",
                        content: "No rider PII, no security details, no unreviewed facts in \
                                  public communications. When in doubt, ask before pasting.",
                    },
                ],
            },
        ],
    }
}

fn intro_quiz() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion {
            id: "intro-1",
            prompt: "What is the primary goal of this training?",
            options: BTreeMap::from([
                ("a", "Master advanced AI model fine-tuning"),
                ("b", "Understand AI basics and how to apply AI at the agency"),
                ("c", "Build production AI APIs"),
                ("d", "Implement SSO and authentication"),
            ]),
            correct: "b",
            help: Some(
                "Participants should understand AI concepts and think about practical \
                 applications.",
            ),
        },
        QuizQuestion {
            id: "intro-2",
            prompt: "About how long is this program designed to take?",
            options: BTreeMap::from([
                ("a", "~10 minutes"),
                ("b", "~30 minutes"),
                ("c", "~2 hours"),
                ("d", "All day"),
            ]),
            correct: "b",
            help: Some("The program targets about 30 minutes of self-guided learning."),
        },
    ]
}

fn eras_quiz() -> Vec<QuizQuestion> {
    vec![QuizQuestion {
        id: "eras-1",
        prompt: "Which sequence best reflects the progression of AI described?",
        options: BTreeMap::from([
            ("a", "Self-replication, then rules-based, then foundational models"),
            ("b", "Rules and ML, then foundational models, then the agentic era"),
            ("c", "Foundational models, then rules-based, then the agentic era"),
            ("d", "The agentic era, then rules-based, then foundational models"),
        ]),
        correct: "b",
        help: None,
    }]
}

#[cfg(test)]
mod tests {
    use super::{Catalog, module_key};

    #[test]
    fn module_keys_are_course_prefixed() {
        assert_eq!(
            module_key("ai-foundations", "introduction"),
            "ai-foundations:introduction"
        );
    }

    #[test]
    fn finds_courses_by_slug() {
        let catalog = Catalog::builtin();

        assert_eq!(
            catalog.course("ai-foundations").unwrap().meta.title,
            "AI Foundations"
        );
        assert!(catalog.course("no-such-course").is_none());
    }

    #[test]
    fn finds_modules_within_a_course() {
        let catalog = Catalog::builtin();

        assert!(catalog.module("ai-foundations", "ai-eras").is_some());
        assert!(catalog.module("ai-foundations", "guardrails").is_none());
        assert!(catalog.module("no-such-course", "introduction").is_none());
    }

    #[test]
    fn next_module_follows_course_order() {
        let catalog = Catalog::builtin();

        let next = catalog.next_module("ai-foundations", "introduction").unwrap();
        assert_eq!(next.slug, "ai-eras");

        // Last module has nothing after it.
        assert!(catalog.next_module("ai-foundations", "everyday-ai").is_none());
    }

    #[test]
    fn looks_up_quiz_questions() {
        let catalog = Catalog::builtin();

        assert_eq!(catalog.quiz("ai-foundations", "introduction").len(), 2);
        assert!(catalog.quiz("ai-foundations", "everyday-ai").is_empty());

        let question = catalog
            .question("ai-foundations", "introduction", "intro-2")
            .unwrap();
        assert_eq!(question.correct, "b");
        assert!(
            catalog
                .question("ai-foundations", "introduction", "intro-9")
                .is_none()
        );
    }

    #[test]
    fn summaries_cover_every_course() {
        let catalog = Catalog::builtin();
        let summaries = catalog.summaries();

        assert_eq!(summaries.len(), catalog.courses().len());
        assert_eq!(summaries[0].modules, 3);
    }
}
