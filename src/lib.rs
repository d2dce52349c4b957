//! # 아이덴티티 서비스 백엔드
//!
//! 액세스/리프레시 토큰 쌍의 수명주기(발급, 검증, 갱신, 폐기)를 관리하는
//! 인증 서비스입니다. 서명 토큰은 stateless하게 검증되고, Redis의 생존
//! 기록과 교차 확인되어 즉시 폐기가 가능합니다.
//!
//! ## 모듈 구성
//!
//! - [`config`] - 환경변수 기반 토큰/쿠키 설정
//! - [`db`] - MongoDB 연결 관리
//! - [`caching`] - Redis 클라이언트
//! - [`domain`] - 도메인 모델과 DTO
//! - [`repositories`] - 생존 기록 저장소와 사용자 리포지토리
//! - [`services`] - 토큰 수명주기 관리자와 사용자 서비스
//! - [`handlers`] - HTTP 핸들러 (쿠키 세션 경계)
//! - [`routes`] - 라우트 등록
//! - [`errors`] - 공통 에러 타입

pub mod caching;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod repositories;
pub mod routes;
pub mod services;
