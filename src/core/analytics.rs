//! Revenue and client rankings derived from order history.
//!
//! Everything here is recomputed by a full scan of the orders blob; nothing
//! aggregated is ever stored.

use crate::core::orders;
use crate::errors::Result;
use crate::models::OrderStatus;
use sea_orm::DatabaseConnection;
use std::collections::HashMap;

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSummary {
    /// Revenue over COMPLETED orders only
    pub total_revenue: f64,
    /// Count across all statuses
    pub total_orders: usize,
}

/// One row of the top-clients ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientRank {
    pub name: String,
    pub total: f64,
    pub order_count: usize,
}

/// Total revenue (completed orders) and order count (all statuses).
pub async fn analytics_summary(db: &DatabaseConnection) -> Result<AnalyticsSummary> {
    let all = orders::get_orders(db).await?;
    let total_revenue = all
        .iter()
        .filter(|o| o.status == OrderStatus::Completed)
        .map(|o| o.total)
        .sum();
    Ok(AnalyticsSummary {
        total_revenue,
        total_orders: all.len(),
    })
}

/// The five best clients by completed-order revenue, highest first.
pub async fn top_clients(db: &DatabaseConnection) -> Result<Vec<ClientRank>> {
    let all = orders::get_orders(db).await?;

    let mut by_client: HashMap<String, (f64, usize)> = HashMap::new();
    for order in all.iter().filter(|o| o.status == OrderStatus::Completed) {
        let entry = by_client.entry(order.client_name.clone()).or_default();
        entry.0 += order.total;
        entry.1 += 1;
    }

    let mut ranking: Vec<ClientRank> = by_client
        .into_iter()
        .map(|(name, (total, order_count))| ClientRank {
            name,
            total,
            order_count,
        })
        .collect();
    ranking.sort_by(|a, b| b.total.total_cmp(&a.total));
    ranking.truncate(5);
    Ok(ranking)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::store::{self, keys};
    use crate::test_utils::{sample_order, setup_test_db};

    #[tokio::test]
    async fn test_revenue_counts_only_completed_orders() -> Result<()> {
        let db = setup_test_db().await?;

        let all = vec![
            sample_order("1", "Maria", 500.0, OrderStatus::Completed),
            sample_order("2", "Pedro", 300.0, OrderStatus::Pending),
            sample_order("3", "Maria", 200.0, OrderStatus::Cancelled),
        ];
        store::write_value(&db, keys::ORDERS, &all).await?;

        let summary = analytics_summary(&db).await?;
        assert_eq!(summary.total_revenue, 500.0);
        assert_eq!(summary.total_orders, 3);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_history_yields_zeroes() -> Result<()> {
        let db = setup_test_db().await?;
        let summary = analytics_summary(&db).await?;
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_orders, 0);
        assert!(top_clients(&db).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_top_clients_ranked_and_truncated_to_five() -> Result<()> {
        let db = setup_test_db().await?;

        let mut all = Vec::new();
        // Six clients with distinct completed revenue, plus noise
        for (i, name) in ["A", "B", "C", "D", "E", "F"].iter().enumerate() {
            let total = 100.0 * (i as f64 + 1.0);
            all.push(sample_order(&format!("c{i}"), name, total, OrderStatus::Completed));
        }
        all.push(sample_order("x", "F", 9999.0, OrderStatus::Pending));
        store::write_value(&db, keys::ORDERS, &all).await?;

        let ranking = top_clients(&db).await?;
        assert_eq!(ranking.len(), 5);
        assert_eq!(ranking[0].name, "F");
        assert_eq!(ranking[0].total, 600.0);
        assert_eq!(ranking[0].order_count, 1);
        assert_eq!(ranking[4].name, "B");
        // Lowest-revenue client A fell off the list
        assert!(ranking.iter().all(|r| r.name != "A"));
        Ok(())
    }

    #[tokio::test]
    async fn test_repeat_client_revenue_accumulates() -> Result<()> {
        let db = setup_test_db().await?;

        let all = vec![
            sample_order("1", "Maria", 500.0, OrderStatus::Completed),
            sample_order("2", "Maria", 300.0, OrderStatus::Completed),
            sample_order("3", "Pedro", 600.0, OrderStatus::Completed),
        ];
        store::write_value(&db, keys::ORDERS, &all).await?;

        let ranking = top_clients(&db).await?;
        assert_eq!(ranking[0].name, "Maria");
        assert_eq!(ranking[0].total, 800.0);
        assert_eq!(ranking[0].order_count, 2);
        Ok(())
    }
}
