//! Dashboard overview models

use serde::{Deserialize, Serialize};

/// Direction of a metric's change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Headline metric shown on the dashboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub title: String,
    pub value: String,
    /// Change versus the previous period, e.g. "+12%"
    pub change: String,
    pub trend: Trend,
}

/// One month of the client growth series
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPoint {
    pub month: String,
    pub clients: u64,
}

/// Entry of the recent activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u64,
    pub user: String,
    pub action: String,
    pub target: String,
    pub time: String,
}

impl Activity {
    /// Initials of the acting user, e.g. "SJ" for "Sarah Johnson"
    pub fn initials(&self) -> String {
        self.user
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Everything the dashboard page shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardData {
    pub metrics: Vec<Metric>,
    pub growth: Vec<GrowthPoint>,
    pub activity: Vec<Activity>,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::demo()
    }
}

impl DashboardData {
    /// Static demo data
    pub fn demo() -> Self {
        let metric = |title: &str, value: &str, change: &str, trend| Metric {
            title: title.to_string(),
            value: value.to_string(),
            change: change.to_string(),
            trend,
        };

        let growth = [
            ("Jan", 186),
            ("Feb", 205),
            ("Mar", 237),
            ("Apr", 273),
            ("May", 209),
            ("Jun", 214),
            ("Jul", 234),
            ("Aug", 267),
            ("Sep", 289),
            ("Oct", 312),
            ("Nov", 334),
            ("Dec", 367),
        ]
        .into_iter()
        .map(|(month, clients)| GrowthPoint {
            month: month.to_string(),
            clients,
        })
        .collect();

        let activity = [
            ("Sarah Johnson", "added a new client", "Acme Corp", "2 hours ago"),
            ("Mike Chen", "generated report", "Monthly Sales", "4 hours ago"),
            ("Emily Davis", "updated client status", "TechStart Inc", "6 hours ago"),
            ("John Doe", "created new project", "Website Redesign", "1 day ago"),
        ]
        .into_iter()
        .zip(1..)
        .map(|((user, action, target, time), id)| Activity {
            id,
            user: user.to_string(),
            action: action.to_string(),
            target: target.to_string(),
            time: time.to_string(),
        })
        .collect();

        Self {
            metrics: vec![
                metric("Total Clients", "1,234", "+12%", Trend::Up),
                metric("Monthly Revenue", "$45,231", "+8%", Trend::Up),
                metric("Active Projects", "23", "+3%", Trend::Up),
                metric("Reports Generated", "89", "-2%", Trend::Down),
            ],
            growth,
            activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_shape() {
        let data = DashboardData::demo();
        assert_eq!(data.metrics.len(), 4);
        assert_eq!(data.growth.len(), 12);
        assert_eq!(data.growth.last().map(|p| p.clients), Some(367));
        assert_eq!(data.activity[3].id, 4);
    }

    #[test]
    fn test_initials() {
        let data = DashboardData::demo();
        let initials: Vec<String> = data.activity.iter().map(Activity::initials).collect();
        assert_eq!(initials, ["SJ", "MC", "ED", "JD"]);
    }
}
