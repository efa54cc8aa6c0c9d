use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Course;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseData {
    pub course: Course,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CourseList {
    pub courses: Vec<Course>,
}
