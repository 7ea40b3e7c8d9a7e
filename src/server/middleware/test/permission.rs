use super::*;

async fn load(db: &sea_orm::DatabaseConnection, role: &str) -> Result<User, AppError> {
    let entity = factory::create_user_with_role(db, role).await?;
    User::from_entity(entity)
}

fn is_denied(result: Result<(), AppError>) -> bool {
    matches!(result, Err(AppError::AuthErr(AuthError::AccessDenied(_, _))))
}

/// Tests that administrators satisfy role, faculty and dormitory permissions.
///
/// Expected: Ok for admin and superadmin
#[tokio::test]
async fn administrators_pass_scoped_permissions() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let faculty = factory::create_faculty(db).await?;
    let dormitory = factory::create_dormitory(db).await?;

    for role in ["admin", "superadmin"] {
        let user = load(db, role).await?;
        authorize(
            db,
            &user,
            &[
                Permission::Admin,
                Permission::AnyOf(&[Role::StudentCouncilHead]),
                Permission::FacultyStaff(faculty.id),
                Permission::DormitoryManager(dormitory.id),
            ],
        )
        .await?;
    }

    Ok(())
}

/// Tests that only a superadmin satisfies the superadmin permission.
///
/// Expected: Err(AccessDenied) for admin, Ok for superadmin
#[tokio::test]
async fn superadmin_permission_excludes_admin() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let admin = load(db, "admin").await?;
    let superadmin = load(db, "superadmin").await?;

    assert!(is_denied(
        authorize(db, &admin, &[Permission::SuperAdmin]).await
    ));
    authorize(db, &superadmin, &[Permission::SuperAdmin]).await?;

    Ok(())
}

/// Tests that dean office staff are scoped to their own faculty.
///
/// Expected: Ok for the own faculty, Err(AccessDenied) for another faculty or a student
#[tokio::test]
async fn faculty_staff_scoped_to_faculty() -> Result<(), AppError> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let faculty = factory::create_faculty(db).await?;
    let other = factory::create_faculty(db).await?;

    let dean = User::from_entity(
        factory::user::UserFactory::new(db)
            .role("faculty_dean_office")
            .faculty_id(faculty.id)
            .build()
            .await?,
    )?;
    let student = User::from_entity(
        factory::user::UserFactory::new(db)
            .faculty_id(faculty.id)
            .build()
            .await?,
    )?;

    authorize(db, &dean, &[Permission::FacultyStaff(faculty.id)]).await?;
    assert!(is_denied(
        authorize(db, &dean, &[Permission::FacultyStaff(other.id)]).await
    ));
    assert!(is_denied(
        authorize(db, &student, &[Permission::FacultyStaff(faculty.id)]).await
    ));

    Ok(())
}

/// Tests that dorm managers are scoped to the dormitories they manage.
///
/// Expected: Ok for the managed dormitory, Err(AccessDenied) for another one
#[tokio::test]
async fn dormitory_manager_scoped_to_dormitory() -> Result<(), AppError> {
    let test = TestBuilder::new().with_housing_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let (manager, dormitory) = factory::helpers::create_managed_dormitory(db).await?;
    let other = factory::create_dormitory(db).await?;
    let manager = User::from_entity(manager)?;

    authorize(db, &manager, &[Permission::DormitoryManager(dormitory.id)]).await?;
    assert!(is_denied(
        authorize(db, &manager, &[Permission::DormitoryManager(other.id)]).await
    ));

    Ok(())
}
