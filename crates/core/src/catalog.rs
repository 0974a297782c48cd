//! # Catalog
//!
//! The ordered list of projects on the menu. The built-in catalog is the
//! default; a JSON file with the same record shape can replace it.

use crate::models::{Category, Flavor, Links, ProjectRecord};
use anyhow::{Context, Result};
use regex::Regex;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;
use thiserror::Error;

/// A single data-integrity problem found in a catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityIssue {
    #[error("duplicate project id `{0}`")]
    DuplicateId(String),

    #[error("project id `{0}` is not anchor-safe (use lowercase letters, digits and '-')")]
    InvalidId(String),

    #[error("project `{0}` has an empty primary link")]
    MissingPrimaryLink(String),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog failed integrity checks: {}", format_issues(.0))]
    Integrity(Vec<IntegrityIssue>),

    #[error("catalog file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

fn format_issues(issues: &[IntegrityIssue]) -> String {
    issues
        .iter()
        .map(|i| i.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn anchor_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9-]*$").expect("static regex"))
}

/// Ordered, validated collection of project records
#[derive(Debug, Clone)]
pub struct Catalog {
    projects: Vec<ProjectRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting it if any integrity check fails
    pub fn new(projects: Vec<ProjectRecord>) -> Result<Self, CatalogError> {
        let issues = check_integrity(&projects);
        if !issues.is_empty() {
            return Err(CatalogError::Integrity(issues));
        }
        Ok(Self { projects })
    }

    /// Parse a catalog from a JSON array of records
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let projects: Vec<ProjectRecord> = serde_json::from_str(json)?;
        Self::new(projects)
    }

    /// Load a catalog file from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read catalog: {:?}", path))?;
        let catalog = Self::from_json(&content)
            .with_context(|| format!("Invalid catalog: {:?}", path))?;
        tracing::info!(path = %path.display(), projects = catalog.len(), "Loaded catalog");
        Ok(catalog)
    }

    /// The menu that ships with the site
    pub fn builtin() -> Self {
        Self {
            projects: builtin_projects(),
        }
    }

    pub fn projects(&self) -> &[ProjectRecord] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProjectRecord> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Categories present in the catalog, in first-appearance order
    pub fn categories(&self) -> Vec<Category> {
        let mut seen = HashSet::new();
        self.projects
            .iter()
            .map(|p| p.category)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    /// Tab labels: "All" followed by the catalog's categories
    pub fn category_tabs(&self) -> Vec<String> {
        std::iter::once("All".to_string())
            .chain(self.categories().iter().map(|c| c.label().to_string()))
            .collect()
    }

    /// Image paths referenced by the catalog, in catalog order
    pub fn image_refs(&self) -> Vec<&str> {
        self.projects.iter().filter_map(|p| p.image_ref()).collect()
    }
}

/// Run every integrity check over a list of records
pub fn check_integrity(projects: &[ProjectRecord]) -> Vec<IntegrityIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();

    for project in projects {
        if !seen.insert(project.id.as_str()) {
            issues.push(IntegrityIssue::DuplicateId(project.id.clone()));
        }
        if !anchor_pattern().is_match(&project.id) {
            issues.push(IntegrityIssue::InvalidId(project.id.clone()));
        }
        if project.links.primary.trim().is_empty() {
            issues.push(IntegrityIssue::MissingPrimaryLink(project.id.clone()));
        }
    }

    issues
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn builtin_projects() -> Vec<ProjectRecord> {
    vec![
        ProjectRecord {
            id: "citybike-full".to_string(),
            flavor_key: Flavor::Matcha,
            name: "Citybike Forecasting (Full Pipeline)".to_string(),
            category: Category::Pipelines,
            description: "End-to-end demand forecasting for NYC Citi Bike stations.".to_string(),
            technologies: strings(&["Python", "scikit-learn", "XGBoost", "Snowflake", "Streamlit"]),
            badges: strings(&["timeseries", "mlops", "feature-engineering"]),
            impact: "Reduced demand error & improved capacity alignment.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/citybike-forecasting"),
            long_description: Some(
                "This project is a full end-to-end pipeline for forecasting NYC Citi Bike demand. \
                 It includes data ingestion, feature engineering (holidays, weather), modeling, \
                 evaluation, and deployment."
                    .to_string(),
            ),
            image: Some("/cafe/matcha.jpeg".to_string()),
        },
        ProjectRecord {
            id: "taxi-sp25".to_string(),
            flavor_key: Flavor::Chai,
            name: "NYC Taxi Ride Forecasting (SP25)".to_string(),
            category: Category::Pipelines,
            description: "Short-horizon ride forecasts with clear baselines.".to_string(),
            technologies: strings(&["Python", "Prophet", "XGBoost"]),
            badges: strings(&["forecasting", "evaluation", "notebooks"]),
            impact: "Consistent predictions across windows.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/sp25_taxi"),
            long_description: Some(
                "This project focuses on short-horizon forecasting of NYC taxi rides using clear \
                 baselines and disciplined evaluation methods to ensure consistent predictions \
                 across different time windows."
                    .to_string(),
            ),
            image: Some("/cafe/chai.jpeg".to_string()),
        },
        ProjectRecord {
            id: "crypto-flow-5m".to_string(),
            flavor_key: Flavor::Espresso,
            name: "Crypto Flow 5M".to_string(),
            category: Category::Markets,
            description: "Flow and microstructure signals on 5-minute crypto bars.".to_string(),
            technologies: strings(&["Python", "pandas", "NumPy"]),
            badges: strings(&["quant", "microstructure", "research"]),
            impact: "Predictive regimes across volatility states.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/cryptoflow-5m"),
            long_description: Some(
                "This project analyzes flow and microstructure signals on 5-minute bars of \
                 cryptocurrency data, incorporating regime analysis to identify predictive \
                 patterns across different volatility states."
                    .to_string(),
            ),
            image: Some("/cafe/espresso.jpeg".to_string()),
        },
        ProjectRecord {
            id: "blockchain-explorer".to_string(),
            flavor_key: Flavor::Jasmine,
            name: "Blockchain Explorer & Network Analysis".to_string(),
            category: Category::Analytics,
            description: "Graph analysis of on-chain transfers: clusters, hubs and motifs."
                .to_string(),
            technologies: strings(&["Python", "networkx", "pandas"]),
            badges: strings(&["graph", "on-chain", "clustering"]),
            impact: "Deeper wallet identity & flow structure.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/blockchain-explorer"),
            long_description: Some(
                "This project explores on-chain transfer graphs to identify clustering, hubs, \
                 and motifs, providing deeper insights into wallet identities and transaction \
                 flow structures."
                    .to_string(),
            ),
            image: Some("/cafe/jasmine.jpeg".to_string()),
        },
        ProjectRecord {
            id: "serverless-etl".to_string(),
            flavor_key: Flavor::Latte,
            name: "Serverless ETL (AWS + Athena + Power BI)".to_string(),
            category: Category::Etl,
            description: "Serverless ingestion and querying of NYC taxi data on AWS.".to_string(),
            technologies: strings(&["AWS Lambda", "S3", "Athena", "Glue", "Power BI"]),
            badges: strings(&["serverless", "data-engineering", "bi"]),
            impact: "Costs down; scale retained.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/aws-lambda-athena-powerbi-nyc-taxi"),
            long_description: Some(
                "This project implements a serverless ETL pipeline using AWS services such as \
                 S3, Lambda, Glue, and Athena, topped with Power BI for scalable analytics with \
                 minimal infrastructure costs."
                    .to_string(),
            ),
            image: Some("/cafe/latte.jpeg".to_string()),
        },
        ProjectRecord {
            id: "landmine-r".to_string(),
            flavor_key: Flavor::Taro,
            name: "Landmine Detection (R)".to_string(),
            category: Category::Research,
            description: "Signal processing and classification on noisy sensor data.".to_string(),
            technologies: strings(&["R", "tidyverse", "caret"]),
            badges: strings(&["signal-processing", "classification", "research"]),
            impact: "Improved performance on noisy signals.".to_string(),
            links: Links::repo("https://github.com/gourimenon8/landmine-detection-r"),
            long_description: Some(
                "This research project focuses on landmine detection using signal processing and \
                 classification techniques implemented in R, utilizing tidy pipelines and \
                 benchmarks to improve performance on noisy signals."
                    .to_string(),
            ),
            image: Some("/cafe/taro.jpg".to_string()),
        },
        ProjectRecord {
            id: "biomed-segmentation".to_string(),
            flavor_key: Flavor::Jasmine,
            name: "Biomedical Image Segmentation".to_string(),
            category: Category::Research,
            description: "PyTorch segmentation models for biomedical imaging.".to_string(),
            technologies: strings(&["Python", "PyTorch", "OpenCV"]),
            badges: strings(&["computer-vision", "segmentation", "research"]),
            impact: "Segmentation models shipped with supporting services.".to_string(),
            links: Links::repo("https://github.com/gourimenon8"),
            long_description: None,
            image: None,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str) -> ProjectRecord {
        ProjectRecord {
            id: id.to_string(),
            flavor_key: Flavor::Latte,
            name: id.to_string(),
            category: Category::Etl,
            description: String::new(),
            technologies: vec![],
            badges: vec![],
            impact: String::new(),
            links: Links::repo("https://example.com"),
            long_description: None,
            image: None,
        }
    }

    #[test]
    fn test_builtin_catalog_passes_integrity_checks() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 7);
        assert!(check_integrity(catalog.projects()).is_empty());
    }

    #[test]
    fn test_builtin_catalog_ids_are_unique() {
        let catalog = Catalog::builtin();
        let ids: HashSet<&str> = catalog.projects().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), catalog.len());
    }

    #[test]
    fn test_duplicate_ids_are_reported_not_panicked() {
        let result = Catalog::new(vec![record("a"), record("b"), record("a")]);
        match result {
            Err(CatalogError::Integrity(issues)) => {
                assert_eq!(issues, vec![IntegrityIssue::DuplicateId("a".to_string())]);
            }
            other => panic!("expected integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_ids_and_empty_links_are_reported() {
        let mut bad = record("Has Spaces");
        bad.links.primary = "  ".to_string();
        let issues = check_integrity(&[bad]);
        assert_eq!(
            issues,
            vec![
                IntegrityIssue::InvalidId("Has Spaces".to_string()),
                IntegrityIssue::MissingPrimaryLink("Has Spaces".to_string()),
            ]
        );
    }

    #[test]
    fn test_category_tabs_follow_first_appearance() {
        let tabs = Catalog::builtin().category_tabs();
        assert_eq!(
            tabs,
            vec!["All", "Pipelines", "Markets", "Analytics", "ETL", "Research"]
        );
    }

    #[test]
    fn test_from_json_rejects_malformed_input() {
        assert!(matches!(
            Catalog::from_json("[{\"id\": 3}]"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_get_by_id() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("taxi-sp25").unwrap().flavor_key, Flavor::Chai);
        assert!(catalog.get("missing").is_none());
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("cafe-catalog-{}.json", std::process::id()));
        let json = serde_json::to_string(&vec![record("solo")]).unwrap();
        tokio::fs::write(&path, json).await.unwrap();

        let catalog = Catalog::load(&path).await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.projects()[0].id, "solo");

        let _ = tokio::fs::remove_file(&path).await;
    }
}
