#![allow(dead_code)]

//! Portfolio data model. Portfolios are exported as a pre-rendered
//! HTML/CSS/JS bundle (see `export::archive`), so nothing in the pipeline
//! walks this structure today — it documents the record shape owned by the
//! portfolio CRUD collaborator and keeps the wire contract in one place.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioData {
    pub personal_info: PortfolioPersonalInfo,
    pub about: Option<String>,
    pub projects: Vec<PortfolioProject>,
    pub skills: Vec<crate::models::resume::SkillGroup>,
    pub experience: Vec<crate::models::resume::ExperienceEntry>,
    pub testimonials: Vec<Testimonial>,
    pub contact: Contact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioPersonalInfo {
    pub full_name: Option<String>,
    pub tagline: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PortfolioProject {
    pub title: Option<String>,
    pub description: Option<String>,
    pub images: Vec<String>,
    pub technologies: Vec<String>,
    pub live_url: Option<String>,
    pub github_url: Option<String>,
    pub featured: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Testimonial {
    pub name: Option<String>,
    pub role: Option<String>,
    pub company: Option<String>,
    pub text: Option<String>,
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub availability: Option<String>,
}
