//! # 路由配置
//!
//! 路径沿用既有前端约定的拼写，全部挂在根路径下

use axum::Router;
use axum::routing::{delete, get, post, put};

use super::handlers;
use super::server::AppState;

/// 创建所有路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .merge(account_routes())
        .merge(auth_routes())
        .merge(member_routes())
        .merge(position_routes())
        .merge(face_routes())
        .merge(history_routes())
        .with_state(state)
}

/// 账户路由
fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/getAccount", get(handlers::accounts::get_account))
        .route("/getAllInforAcc", get(handlers::accounts::get_all_infor_acc))
        .route(
            "/getAccountById/{account_id}",
            get(handlers::accounts::get_account_by_id),
        )
        .route(
            "/updateaccountusername/{username}",
            put(handlers::accounts::update_account_username),
        )
        .route("/getAccByFilter", get(handlers::accounts::get_acc_by_filter))
        .route("/accStatistics", get(handlers::accounts::acc_statistics))
}

/// 认证路由
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/signup", post(handlers::auth::signup))
}

/// 成员路由
fn member_routes() -> Router<AppState> {
    Router::new()
        .route("/createmembers", post(handlers::members::create_member))
        .route("/updateMember/{id}", put(handlers::members::update_member))
}

/// 职位路由
fn position_routes() -> Router<AppState> {
    Router::new()
        .route("/getPosition", get(handlers::positions::get_all_positions))
        .route("/createpositions", post(handlers::positions::insert_position))
        .route(
            "/updatepositions/{id}",
            put(handlers::positions::update_position),
        )
        .route(
            "/delpositions/{id}",
            delete(handlers::positions::delete_position),
        )
}

/// 人脸登记路由
fn face_routes() -> Router<AppState> {
    Router::new()
        .route("/register-face", post(handlers::faces::create_register_face))
        .route("/detect-face", post(handlers::faces::detect_face))
        .route("/delete-face/{id}", delete(handlers::faces::delete_register_face))
        .route("/getimagebyID/{memberId}", get(handlers::faces::get_image_by_id))
        .route(
            "/getAllDataWithUsername",
            get(handlers::faces::get_all_data_with_username),
        )
        .route(
            "/getFaceRegistrationStats",
            get(handlers::faces::get_face_registration_stats),
        )
}

/// 出入记录路由
fn history_routes() -> Router<AppState> {
    Router::new()
        .route("/createhistories", post(handlers::histories::create_enter_history))
        .route(
            "/deletehistories/{id}",
            delete(handlers::histories::delete_histories),
        )
        .route("/getAllHistories", get(handlers::histories::get_all_histories))
        .route("/getHistories", get(handlers::histories::get_histories))
        .route(
            "/getHistoriesByMemberId/{id}",
            get(handlers::histories::get_histories_by_member_id),
        )
        .route("/hisStatistics", get(handlers::histories::his_statistics))
}
