use crate::api::client::VenomicsClient;
use crate::api::models::{Dashboard, NewWidget, Page, Visualization, Widget};
use crate::core::pagination::{PageRequest, paginate};
use crate::error::AppError;
use serde_json::{Value, json};

impl VenomicsClient {
    /// GET `dashboards` (or `dashboards/favorites`), one page.
    pub async fn dashboards(
        &self,
        page: PageRequest,
        only_favorites: bool,
    ) -> Result<Page<Dashboard>, AppError> {
        let path = if only_favorites {
            "dashboards/favorites"
        } else {
            "dashboards"
        };
        Ok(self.transport().get_json_with_query(path, &page).await?)
    }

    pub async fn all_dashboards(&self) -> Result<Vec<Dashboard>, AppError> {
        paginate(
            move |page| self.dashboards(page, false),
            self.first_page(),
        )
        .await
    }

    /// Full dashboard, widgets included.
    pub async fn dashboard(&self, slug: &str) -> Result<Dashboard, AppError> {
        Ok(self
            .transport()
            .get_json(&format!("dashboards/{}", slug))
            .await?)
    }

    pub async fn create_dashboard(&self, name: &str) -> Result<Dashboard, AppError> {
        Ok(self
            .transport()
            .post_json("dashboards", Some(&json!({ "name": name })))
            .await?)
    }

    pub async fn update_dashboard(
        &self,
        dashboard_id: u64,
        patch: &Value,
    ) -> Result<Dashboard, AppError> {
        Ok(self
            .transport()
            .post_json(&format!("dashboards/{}", dashboard_id), Some(patch))
            .await?)
    }

    /// Copy a dashboard's tags and widgets into a new dashboard.
    ///
    /// New widgets point at the same visualization ids; visualizations are
    /// not copied.
    pub async fn duplicate_dashboard(
        &self,
        slug: &str,
        new_name: Option<&str>,
    ) -> Result<Dashboard, AppError> {
        let source = self.dashboard(slug).await?;
        let name = match new_name {
            Some(name) => name.to_string(),
            None => format!("Copy of: {}", source.name),
        };

        let mut copy = self.create_dashboard(&name).await?;
        if !source.tags.is_empty() {
            copy = self
                .update_dashboard(copy.id, &json!({ "tags": source.tags }))
                .await?;
        }

        for widget in &source.widgets {
            let created = self.create_widget(&copy_of_widget(copy.id, widget)).await?;
            copy.widgets.push(created);
        }

        log::info!(
            "Duplicated dashboard {} into {} with {} widgets",
            slug,
            copy.slug,
            copy.widgets.len()
        );
        Ok(copy)
    }

    pub async fn favorite_dashboard(&self, slug: &str) -> Result<(), AppError> {
        self.transport()
            .post(&format!("dashboards/{}/favorite", slug), Some(&json!({})))
            .await?;
        Ok(())
    }

    pub async fn create_widget(&self, widget: &NewWidget) -> Result<Widget, AppError> {
        Ok(self.transport().post_json("widgets", Some(widget)).await?)
    }

    pub async fn update_visualization(
        &self,
        visualization_id: u64,
        patch: &Value,
    ) -> Result<Visualization, AppError> {
        Ok(self
            .transport()
            .post_json(&format!("visualizations/{}", visualization_id), Some(patch))
            .await?)
    }
}

/// Widget record for `dashboard_id` mirroring `widget`.
pub fn copy_of_widget(dashboard_id: u64, widget: &Widget) -> NewWidget {
    NewWidget {
        dashboard_id,
        visualization_id: widget.visualization.as_ref().map(|v| v.id),
        text: widget.text.clone(),
        options: widget.options.clone(),
        width: 1,
    }
}
