use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        auth::{LoginRequest, LoginResponse, SignupRequest},
        courses::{CourseData, CourseList, CreateCourseRequest, UpdateCourseRequest},
        orders::{CreateOrderRequest, OrderReceipt},
        payments::{CourseQuote, CreatePaymentIntentRequest, PaymentIntentCreated, PriceInput},
        users::{Preferences, PurchaseHistory, UpdateProfileRequest, UserData},
    },
    models::{Course, Order, Purchase, User},
    response::{ApiResponse, Empty, ErrorResponse},
    routes::{admin, courses, health, orders, payments, users},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::signup,
        users::login,
        users::logout,
        users::profile,
        users::update_profile,
        users::purchases,
        admin::signup,
        admin::login,
        admin::logout,
        admin::my_courses,
        courses::list_courses,
        courses::get_course,
        courses::create_course,
        courses::update_course,
        courses::delete_course,
        orders::create_order,
        payments::create_payment_intent
    ),
    components(
        schemas(
            User,
            Course,
            Order,
            Purchase,
            SignupRequest,
            LoginRequest,
            LoginResponse,
            UpdateProfileRequest,
            Preferences,
            UserData,
            PurchaseHistory,
            CreateCourseRequest,
            UpdateCourseRequest,
            CourseData,
            CourseList,
            CreateOrderRequest,
            OrderReceipt,
            CreatePaymentIntentRequest,
            CourseQuote,
            PriceInput,
            PaymentIntentCreated,
            Empty,
            ErrorResponse,
            ApiResponse<CourseList>,
            ApiResponse<OrderReceipt>,
            ApiResponse<PaymentIntentCreated>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Users", description = "Account endpoints"),
        (name = "Admin", description = "Admin account and course ownership endpoints"),
        (name = "Courses", description = "Course catalog endpoints"),
        (name = "Orders", description = "Order recording endpoints"),
        (name = "Payments", description = "Payment intent endpoints"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
