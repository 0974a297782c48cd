//! # Profile
//!
//! Who runs the café: contact links and the "Meet the Barista" copy.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub github: String,
    pub linkedin: String,
    /// Site-relative path of the résumé document
    pub resume_url: String,
    /// Lead paragraph of the about section. The opening clause, up to the
    /// first comma, is emphasized.
    pub intro: String,
    pub highlights: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "Gouri Menon".to_string(),
            email: "gourimenon8@gmail.com".to_string(),
            github: "https://github.com/gourimenon8".to_string(),
            linkedin: "https://www.linkedin.com/in/gouri-menon-646b17b1/".to_string(),
            resume_url: "/Gouri_CV_US.pdf".to_string(),
            intro: "I am an M.S. in Data Science graduate from the University at Buffalo (SUNY), \
                    focused on reliable pipelines, forecasting, and analytical systems. I love \
                    turning messy data into elegant products and serving insights with clean UI \
                    and thoughtful design."
                .to_string(),
            highlights: vec![
                "Built serverless ETL on AWS; integrated Snowflake dashboards; deployed APIs for ROI-based decisions.".to_string(),
                "Researched biomedical imaging; shipped PyTorch segmentation models & supporting services.".to_string(),
                "Background: Python, SQL, AWS/GCP/Snowflake, Tableau/Power BI.".to_string(),
                "Bridge technical & business teams: forecasting, anomaly detection, and explainable analytics.".to_string(),
            ],
        }
    }
}

impl Profile {
    pub fn mailto(&self) -> String {
        format!("mailto:{}", self.email)
    }

    /// Split the intro after its first comma: the emphasized opening clause
    /// and the rest
    pub fn intro_parts(&self) -> (&str, &str) {
        match self.intro.find(", ") {
            Some(idx) => self.intro.split_at(idx + 1),
            None => (self.intro.as_str(), ""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mailto() {
        assert_eq!(Profile::default().mailto(), "mailto:gourimenon8@gmail.com");
    }

    #[test]
    fn test_intro_parts() {
        let profile = Profile::default();
        let (lead, rest) = profile.intro_parts();
        assert!(lead.ends_with("(SUNY),"));
        assert!(rest.trim_start().starts_with("focused on"));

        let plain = Profile {
            intro: "Hello there".to_string(),
            ..Profile::default()
        };
        assert_eq!(plain.intro_parts(), ("Hello there", ""));
    }
}
