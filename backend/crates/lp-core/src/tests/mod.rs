mod app_record;
