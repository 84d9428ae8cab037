use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DepartmentRepository,
    models::department::Department,
};

/// A nova ordem precisa ser uma permutação completa: sem repetição e
/// cobrindo todos os departamentos, senão posições antigas sobram.
pub fn validate_order(ordered_ids: &[Uuid], total: usize) -> Result<(), AppError> {
    if ordered_ids.is_empty() {
        return Err(AppError::WorkflowViolation(
            "A nova ordem não pode ser vazia.",
        ));
    }

    let mut seen = ordered_ids.to_vec();
    seen.sort();
    seen.dedup();
    if seen.len() != ordered_ids.len() {
        return Err(AppError::WorkflowViolation(
            "A nova ordem não pode repetir departamentos.",
        ));
    }

    if ordered_ids.len() != total {
        return Err(AppError::WorkflowViolation(
            "A nova ordem precisa listar todos os departamentos.",
        ));
    }

    Ok(())
}

#[derive(Clone)]
pub struct DepartmentService {
    repo: DepartmentRepository,
    pool: PgPool,
}

impl DepartmentService {
    pub fn new(repo: DepartmentRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    pub async fn create(
        &self,
        name: &str,
        color: &str,
        icon: Option<&str>,
    ) -> Result<Department, AppError> {
        self.repo.create(&self.pool, name, color, icon).await
    }

    pub async fn list(&self, only_active: bool) -> Result<Vec<Department>, AppError> {
        self.repo.list(only_active).await
    }

    pub async fn get(&self, id: Uuid) -> Result<Department, AppError> {
        self.repo
            .find_by_id(&self.pool, id)
            .await?
            .ok_or(AppError::NotFound("Departamento"))
    }

    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        color: Option<&str>,
        icon: Option<&str>,
    ) -> Result<Department, AppError> {
        self.repo.update(&self.pool, id, name, color, icon).await
    }

    /// Departamento não é apagado: processos antigos ainda o referenciam.
    pub async fn deactivate(&self, id: Uuid) -> Result<Department, AppError> {
        self.repo.deactivate(&self.pool, id).await
    }

    pub async fn reorder(&self, ordered_ids: &[Uuid]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let total = self.repo.count_all(&mut *tx).await?;
        validate_order(ordered_ids, total as usize)?;

        let updated = self.repo.reorder(&mut *tx, ordered_ids).await?;
        if updated as usize != ordered_ids.len() {
            return Err(AppError::WorkflowViolation(
                "A nova ordem contém departamentos desconhecidos.",
            ));
        }

        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordem_vazia_e_rejeitada() {
        assert!(matches!(
            validate_order(&[], 0),
            Err(AppError::WorkflowViolation(_))
        ));
    }

    #[test]
    fn ordem_com_repeticao_e_rejeitada() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(matches!(
            validate_order(&[a, b, a], 3),
            Err(AppError::WorkflowViolation(_))
        ));
    }

    #[test]
    fn ordem_parcial_e_rejeitada() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();

        assert!(matches!(
            validate_order(&[a, b], 3),
            Err(AppError::WorkflowViolation(_))
        ));
    }

    #[test]
    fn permutacao_completa_passa() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        assert!(validate_order(&[c, a, b], 3).is_ok());
    }
}
