export![camera, dirty, environment, geometry, instance, light, material, raster, scene];
